//! Externally triggered build commands and their rejection values.
//!
//! The build panel, keyboard shortcuts, and any scripted driver only ever
//! emit [`BuildCommand`] events; the executors live next to the systems that
//! own the affected state. Failures are signalled with [`ActionError`] —
//! checked by the caller before any shared state is mutated, never raised as
//! a panic across a component boundary.

use std::fmt;

use bevy::prelude::*;

/// Entry points exposed to the UI surface.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildCommand {
    BuildStreetLight,
    BuildHouse,
    BuildCustomBlock,
    EnterRoadMode,
    EnterTreeMode,
    SaveScene,
    LoadScene,
    DeleteSelected,
    DeleteLast,
    DuplicateSelected,
    ClosePanel,
}

/// Typed rejection values for build/edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The wallet cannot cover the cost; nothing was changed.
    InsufficientFunds,
    /// A one-shot item (street light, house, custom block) was already built.
    AlreadyBuilt,
    /// The targeted object no longer exists or nothing is selected.
    NotFound,
    /// A road draft had fewer than two points at commit time.
    InvalidRoad,
}

impl ActionError {
    /// Short user-facing notice text.
    pub fn notice(self) -> &'static str {
        match self {
            ActionError::InsufficientFunds => "Not enough crafties!",
            ActionError::AlreadyBuilt => "Already built",
            ActionError::NotFound => "Nothing selected",
            ActionError::InvalidRoad => "Road needs at least two points",
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notice())
    }
}

impl std::error::Error for ActionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notices_are_nonempty() {
        for err in [
            ActionError::InsufficientFunds,
            ActionError::AlreadyBuilt,
            ActionError::NotFound,
            ActionError::InvalidRoad,
        ] {
            assert!(!err.notice().is_empty());
            assert_eq!(format!("{err}"), err.notice());
        }
    }
}
