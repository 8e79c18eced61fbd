//! Decision-time lookup of a solved policy.

pub mod decision;
pub mod error;
pub mod index;

pub use decision::Decision;
pub use error::PolicyError;
pub use index::{PolicyEntry, PolicyIndex};
