//! Dungeon step progression, event rolls and camping.

use super::types::{Direction, DungeonState, EventCheck, EventKind, EventState};
use crate::core::constants::{
    is_boss_step, is_water_step, DUNGEON_MAX_STEP, ENCOUNTER_CHANCE, FINAL_BOSS_STEP,
    ITEM_COLLECT_CHANCE, MIDBOSS_STEP,
};
use crate::inventory::Inventory;
use crate::units::{create_final_boss, create_mid_boss, dungeon_enemy_roster, Party, Unit};
use rand::Rng;
use std::collections::BTreeSet;

pub fn create_dungeon() -> DungeonState {
    DungeonState {
        step: 0,
        max_step: DUNGEON_MAX_STEP,
        visited_steps: BTreeSet::from([0]),
        can_collect_item: false,
    }
}

/// Moves one step. Moving past either end returns the dungeon unchanged.
///
/// Every successful arrival, revisits included, re-rolls whether an item can
/// be collected. Boss and water steps never hold items.
pub fn advance_dungeon_step<R: Rng + ?Sized>(
    dungeon: &DungeonState,
    direction: Direction,
    rng: &mut R,
) -> DungeonState {
    let new_step = match direction {
        Direction::Forward if dungeon.can_move_forward() => dungeon.step + 1,
        Direction::Backward if dungeon.can_move_backward() => dungeon.step - 1,
        _ => return dungeon.clone(),
    };

    let can_collect_item = !is_boss_step(new_step)
        && !is_water_step(new_step)
        && rng.gen_bool(ITEM_COLLECT_CHANCE);

    let mut visited_steps = dungeon.visited_steps.clone();
    visited_steps.insert(new_step);

    DungeonState {
        step: new_step,
        max_step: dungeon.max_step,
        visited_steps,
        can_collect_item,
    }
}

/// Determines what happens on arriving at `step`.
///
/// Boss and water steps are fixed and never roll. Any other step has an
/// `ENCOUNTER_CHANCE` of a random roster enemy. The inventory is returned as
/// given; no event touches it when it fires.
pub fn check_dungeon_event<R: Rng + ?Sized>(
    step: u32,
    _dungeon: &DungeonState,
    inventory: Inventory,
    rng: &mut R,
) -> EventCheck {
    let event = if step == MIDBOSS_STEP {
        Some(EventState {
            kind: EventKind::MidBoss,
            message: "A huge shadow blocks the way...\n\
                      \"None shall pass. Show me your strength!\""
                .to_string(),
            enemy: Some(create_mid_boss()),
        })
    } else if step == FINAL_BOSS_STEP {
        Some(EventState {
            kind: EventKind::FinalBoss,
            message: "You have reached the deepest chamber...\n\
                      A voice echoes from the dark: \"You came far. This is where it ends!\""
                .to_string(),
            enemy: Some(create_final_boss()),
        })
    } else if is_water_step(step) {
        Some(EventState {
            kind: EventKind::Water,
            message: "You found a spring! You can rest here.".to_string(),
            enemy: None,
        })
    } else if rng.gen_bool(ENCOUNTER_CHANCE) {
        Some(EventState {
            kind: EventKind::Encounter,
            message: "Monsters appear!".to_string(),
            enemy: Some(roll_dungeon_enemy(rng)),
        })
    } else {
        None
    };

    if let Some(ev) = &event {
        tracing::trace!(step, kind = ?ev.kind, "dungeon event");
    }

    EventCheck { event, inventory }
}

/// Uniform pick from the dungeon roster.
pub fn roll_dungeon_enemy<R: Rng + ?Sized>(rng: &mut R) -> Unit {
    let mut roster = dungeon_enemy_roster();
    let index = rng.gen_range(0..roster.len());
    roster.swap_remove(index)
}

/// Restores hp and mp to max for every party member, fallen ones included.
pub fn camp_at_water(party: &Party) -> Party {
    let mut rested = party.clone();
    rested.hero.restore_full();
    for companion in &mut rested.companions {
        companion.restore_full();
    }
    rested
}
