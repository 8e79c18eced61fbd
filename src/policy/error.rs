use thiserror::Error;

use crate::types::{CityId, Pending};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("No state for {city} with {pending}")]
    UnknownState { city: CityId, pending: Pending },
}
