//! Derived village satisfaction score.
//!
//! Recomputed whenever the inventory composition changes; the formula is a
//! pure function of the placed-object counts and the current balance, and
//! the result is always clamped to [0, 100].

use bevy::prelude::*;

use crate::economy::Wallet;
use crate::objects::{InventoryChanged, ObjectKind, ObjectRegistry, PlacedObject};

/// Current satisfaction score, 0..=100.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Happiness {
    pub score: u8,
}

/// Counts of the kinds that feed the happiness formula.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCounts {
    pub houses: u32,
    pub street_lights: u32,
    pub custom_blocks: u32,
}

/// The happiness formula.
///
/// Base 0; housing contributes up to 40, lighting up to 30, with a +10 synergy
/// bonus when both exist. Over-building custom blocks relative to houses costs
/// 10. A comfortable balance (> 200) adds 10, a strained one (< 50) removes 10.
pub fn recompute_happiness(counts: InventoryCounts, balance: i64) -> u8 {
    let mut score: i64 = 0;
    score += i64::from((10 * counts.houses).min(40));
    score += i64::from((7 * counts.street_lights).min(30));
    if counts.houses > 0 && counts.street_lights > 0 {
        score += 10;
    }
    if counts.custom_blocks > 2 * counts.houses {
        score -= 10;
    }
    if balance > 200 {
        score += 10;
    } else if balance < 50 {
        score -= 10;
    }
    score.clamp(0, 100) as u8
}

/// Recompute the score after any inventory mutation. Drag/move systems never
/// emit [`InventoryChanged`], so a pure reposition leaves the score untouched.
pub fn update_happiness(
    mut events: EventReader<InventoryChanged>,
    registry: Res<ObjectRegistry>,
    objects: Query<&PlacedObject>,
    wallet: Res<Wallet>,
    mut happiness: ResMut<Happiness>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let mut counts = InventoryCounts::default();
    for entity in registry.iter() {
        let Ok(placed) = objects.get(entity) else {
            continue;
        };
        match placed.kind {
            ObjectKind::House => counts.houses += 1,
            ObjectKind::StreetLight => counts.street_lights += 1,
            ObjectKind::CustomBlock => counts.custom_blocks += 1,
            ObjectKind::Road | ObjectKind::Tree => {}
        }
    }

    happiness.score = recompute_happiness(counts, wallet.crafties);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        // 3 houses, 5 lights, 2 blocks, balance 250:
        // min(30,40) + min(35,30) + 10 + 0 + 10 = 80
        let counts = InventoryCounts {
            houses: 3,
            street_lights: 5,
            custom_blocks: 2,
        };
        assert_eq!(recompute_happiness(counts, 250), 80);
    }

    #[test]
    fn test_empty_village() {
        assert_eq!(recompute_happiness(InventoryCounts::default(), 200), 0);
    }

    #[test]
    fn test_low_balance_cannot_go_negative() {
        let counts = InventoryCounts {
            houses: 0,
            street_lights: 0,
            custom_blocks: 5,
        };
        // -10 (blocks over 2x houses) -10 (balance < 50), clamped to 0.
        assert_eq!(recompute_happiness(counts, 0), 0);
    }

    #[test]
    fn test_caps_apply() {
        let counts = InventoryCounts {
            houses: 100,
            street_lights: 100,
            custom_blocks: 0,
        };
        // 40 + 30 + 10 + 10 = 90; caps keep the tails flat.
        assert_eq!(recompute_happiness(counts, 10_000), 90);
    }

    #[test]
    fn test_block_penalty_boundary() {
        let at_limit = InventoryCounts {
            houses: 2,
            street_lights: 0,
            custom_blocks: 4,
        };
        let over_limit = InventoryCounts {
            houses: 2,
            street_lights: 0,
            custom_blocks: 5,
        };
        // 4 <= 2*2 incurs no penalty; 5 > 4 does.
        assert_eq!(recompute_happiness(at_limit, 100), 20);
        assert_eq!(recompute_happiness(over_limit, 100), 10);
    }

    #[test]
    fn test_bounds_hold_for_arbitrary_inputs() {
        for houses in [0u32, 1, 3, 17, 1000] {
            for lights in [0u32, 2, 9, 500] {
                for blocks in [0u32, 1, 50] {
                    for balance in [-500i64, 0, 49, 50, 200, 201, 1_000_000] {
                        let counts = InventoryCounts {
                            houses,
                            street_lights: lights,
                            custom_blocks: blocks,
                        };
                        let score = recompute_happiness(counts, balance);
                        assert!(score <= 100);
                    }
                }
            }
        }
    }
}
