use std::fmt;

use crate::mdp::ActionKind;
use crate::types::CityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the vehicle should do at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Decision {
    /// Drive empty toward the given neighbouring city.
    MoveTo(CityId),
    /// Accept the task on offer and deliver it.
    AcceptTask,
    /// The city has no roads and nothing to deliver.
    NoFeasibleAction,
}

impl From<ActionKind> for Decision {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Move { to } => Decision::MoveTo(to),
            ActionKind::Pickup { .. } => Decision::AcceptTask,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::MoveTo(city) => write!(f, "move to {}", city),
            Decision::AcceptTask => write!(f, "accept task"),
            Decision::NoFeasibleAction => write!(f, "no feasible action"),
        }
    }
}
