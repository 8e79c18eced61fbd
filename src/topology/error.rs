use thiserror::Error;

use crate::types::CityId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Unknown city: {0}")]
    UnknownCity(CityId),

    #[error("City name already exists: {0}")]
    DuplicateName(String),

    #[error("A city cannot be connected to itself: {0}")]
    SelfLoop(CityId),

    #[error("Road length must be positive and finite, got {0}")]
    InvalidDistance(f64),
}
