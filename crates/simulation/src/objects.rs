//! Placed-object model: kind tags, per-entity components, and the
//! insertion-ordered registry that forms the interaction set.
//!
//! The registry is the single source of truth for which entities are
//! selectable/draggable. Every mutation that adds or removes a placed object
//! must update the registry and the ECS world in the same system, so the
//! render set and interaction set never diverge across a frame boundary.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind tag carried by every placed object root entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    StreetLight,
    House,
    CustomBlock,
    Road,
    Tree,
}

impl ObjectKind {
    /// Crafties charged when building (and again when duplicating) this kind.
    /// Roads are priced by arc length at commit time, not by a flat cost.
    pub fn cost(self) -> u32 {
        match self {
            ObjectKind::StreetLight => 20,
            ObjectKind::House => 30,
            ObjectKind::CustomBlock => 40,
            ObjectKind::Tree => 15,
            ObjectKind::Road => 0,
        }
    }

    /// Roads keep their freehand geometry; everything else snaps on release.
    pub fn snaps_to_grid(self) -> bool {
        !matches!(self, ObjectKind::Road)
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::StreetLight => "streetlight",
            ObjectKind::House => "house",
            ObjectKind::CustomBlock => "block",
            ObjectKind::Road => "road",
            ObjectKind::Tree => "tree",
        }
    }
}

/// Component on the root entity of every placed object.
///
/// `cost` records what was actually charged at creation; deletion refunds
/// this value, duplication charges it again.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlacedObject {
    pub kind: ObjectKind,
    pub cost: u32,
}

/// Extra data carried by committed road ribbons.
#[derive(Component, Debug, Clone, Copy)]
pub struct RoadRibbon {
    pub arc_length: f32,
}

/// Packed 0xRRGGBB color of a custom block; this is also the wire format
/// used by the scene snapshot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockColor(pub u32);

impl BlockColor {
    pub fn to_color(self) -> Color {
        let r = ((self.0 >> 16) & 0xff) as u8;
        let g = ((self.0 >> 8) & 0xff) as u8;
        let b = (self.0 & 0xff) as u8;
        Color::srgb_u8(r, g, b)
    }
}

/// Insertion-ordered interaction set.
///
/// An object's identity is its entity id; its slot preserves creation order
/// so `pop_last` removes the most recently registered object.
#[derive(Resource, Default, Debug)]
pub struct ObjectRegistry {
    entries: Vec<Entity>,
}

impl ObjectRegistry {
    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(!self.entries.contains(&entity));
        self.entries.push(entity);
    }

    /// Remove `entity` from the set. Returns `false` if it was not a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        if let Some(idx) = self.entries.iter().position(|&e| e == entity) {
            self.entries.remove(idx);
            true
        } else {
            false
        }
    }

    /// Remove and return the most recently inserted member.
    pub fn pop_last(&mut self) -> Option<Entity> {
        self.entries.pop()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Emitted by every inventory-mutating operation (create, delete, duplicate,
/// snapshot load) — and never by a pure drag/move. Happiness recomputes on it.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct InventoryChanged;
