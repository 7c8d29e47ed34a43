//! Dungeon path and event data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::inventory::Inventory;
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Position on the linear dungeon path `0..=max_step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonState {
    pub step: u32,
    /// Fixed when the dungeon is created
    pub max_step: u32,
    pub visited_steps: BTreeSet<u32>,
    /// Rolled on each arrival; cleared once the item is picked up
    pub can_collect_item: bool,
}

impl DungeonState {
    pub fn can_move_forward(&self) -> bool {
        self.step < self.max_step
    }

    pub fn can_move_backward(&self) -> bool {
        self.step > 0
    }

    pub fn at_entrance(&self) -> bool {
        self.step == 0
    }

    pub fn has_visited(&self, step: u32) -> bool {
        self.visited_steps.contains(&step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Rest spot: camp or continue
    Water,
    MidBoss,
    FinalBoss,
    Encounter,
}

impl EventKind {
    pub fn starts_battle(&self) -> bool {
        !matches!(self, EventKind::Water)
    }
}

/// Interrupt raised on arriving at a step. Lives until the player responds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventState {
    pub kind: EventKind,
    pub message: String,
    /// Present for every battle-starting kind
    pub enemy: Option<Unit>,
}

/// Output of an event check. The inventory is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCheck {
    pub event: Option<EventState>,
    pub inventory: Inventory,
}
