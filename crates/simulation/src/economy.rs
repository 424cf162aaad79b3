//! Crafties ledger and the one-shot build flags.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::STARTING_CRAFTIES;
use crate::game_actions::ActionError;
use crate::objects::ObjectKind;

/// The session wallet. Spends that would go negative are rejected before any
/// state changes; there is no other invariant on the balance.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub crafties: i64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            crafties: STARTING_CRAFTIES,
        }
    }
}

impl Wallet {
    pub fn can_afford(&self, amount: u32) -> bool {
        i64::from(amount) <= self.crafties
    }

    /// Debit `amount`, atomically with the triggering action: on rejection
    /// the wallet is untouched and the caller must abort before mutating
    /// anything else.
    pub fn spend(&mut self, amount: u32) -> Result<(), ActionError> {
        if !self.can_afford(amount) {
            return Err(ActionError::InsufficientFunds);
        }
        self.crafties -= i64::from(amount);
        Ok(())
    }

    /// Credit `amount` back, used on deletion with the object's recorded cost.
    pub fn refund(&mut self, amount: u32) {
        self.crafties += i64::from(amount);
    }
}

/// First-write-wins flags gating the one-shot build items. Never reset, not
/// even by a snapshot load.
#[derive(Resource, Debug, Default, Clone, Serialize, Deserialize)]
pub struct OnceFlags {
    pub street_light_built: bool,
    pub house_built: bool,
    pub custom_block_built: bool,
}

impl OnceFlags {
    /// Whether `kind` is gated and its gate has already fired.
    pub fn already_built(&self, kind: ObjectKind) -> bool {
        match kind {
            ObjectKind::StreetLight => self.street_light_built,
            ObjectKind::House => self.house_built,
            ObjectKind::CustomBlock => self.custom_block_built,
            ObjectKind::Road | ObjectKind::Tree => false,
        }
    }

    pub fn mark_built(&mut self, kind: ObjectKind) {
        match kind {
            ObjectKind::StreetLight => self.street_light_built = true,
            ObjectKind::House => self.house_built = true,
            ObjectKind::CustomBlock => self.custom_block_built = true,
            ObjectKind::Road | ObjectKind::Tree => {}
        }
    }
}
