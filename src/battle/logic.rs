//! Turn order, action resolution and victory checks.

use super::types::{BattleActor, BattleState, BattleStatus, Side, SkillOutcome, Winner};
use crate::inventory::{apply_item_effect, Item, ItemUse};
use crate::units::{Party, Skill, SkillKind, Unit};
use std::cmp::Reverse;

/// Who a skill lands on. A caster healing itself cannot be borrowed twice,
/// so self-targeting is spelled out.
pub enum SkillTarget<'a> {
    Caster,
    Other(&'a mut Unit),
}

/// Orders every ally, then every enemy, by speed (fastest first).
///
/// Ties keep list order within a side and put allies ahead of enemies.
pub fn compute_turn_order(allies: &[Unit], enemies: &[Unit]) -> Vec<BattleActor> {
    let mut order: Vec<(BattleActor, i32)> = allies
        .iter()
        .enumerate()
        .map(|(i, u)| (BattleActor::ally(i), u.spd))
        .chain(
            enemies
                .iter()
                .enumerate()
                .map(|(i, u)| (BattleActor::enemy(i), u.spd)),
        )
        .collect();
    // Stable sort: insertion order already encodes both tie-breaks.
    order.sort_by_key(|(_, spd)| Reverse(*spd));
    order.into_iter().map(|(actor, _)| actor).collect()
}

pub fn start_battle(party: &Party, enemies: &[Unit]) -> BattleState {
    let allies: Vec<Unit> = party.members().cloned().collect();
    let enemies = enemies.to_vec();
    let turn_order = compute_turn_order(&allies, &enemies);
    BattleState {
        allies,
        enemies,
        turn_order,
        turn_index: 0,
        log: vec!["The battle begins!".to_string()],
    }
}

pub fn select_first_alive(units: &[Unit]) -> Option<usize> {
    units.iter().position(Unit::is_alive)
}

/// Basic attack. Always deals at least 1 damage, whatever the attacker's atk.
pub fn apply_attack(attacker: &Unit, target: &mut Unit) -> u32 {
    let damage = attacker.atk.max(1).unsigned_abs();
    target.take_damage(damage);
    damage
}

/// Casts `skill`. Fails without side effects when the caster lacks MP.
///
/// Attack skills deal exactly `skill.damage` with no minimum; a negative
/// value heals the target and is logged as recovery. Heal skills
/// restore `|skill.damage|` capped at max hp, and the message reports the
/// amount actually restored. Buffs spend MP and do nothing else.
pub fn use_skill(caster: &mut Unit, skill: &Skill, target: SkillTarget<'_>) -> SkillOutcome {
    if caster.mp < skill.mp_cost {
        return SkillOutcome {
            success: false,
            message: format!("{} doesn't have enough MP!", caster.name),
        };
    }
    caster.mp -= skill.mp_cost;

    let caster_name = caster.name.clone();
    let target = match target {
        SkillTarget::Caster => caster,
        SkillTarget::Other(unit) => unit,
    };

    let message = match skill.kind {
        SkillKind::Attack if skill.damage < 0 => {
            let healed = target.restore_hp(skill.heal_amount());
            format!(
                "{} uses {}! {} recovers {} HP!",
                caster_name, skill.name, target.name, healed
            )
        }
        SkillKind::Attack => {
            target.take_damage(skill.damage.unsigned_abs());
            format!(
                "{} uses {}! {} takes {} damage!",
                caster_name, skill.name, target.name, skill.damage
            )
        }
        SkillKind::Heal => {
            let healed = target.restore_hp(skill.heal_amount());
            format!(
                "{} uses {}! {} recovers {} HP!",
                caster_name, skill.name, target.name, healed
            )
        }
        SkillKind::Buff => format!(
            "{} uses {}! (effect not implemented)",
            caster_name, skill.name
        ),
    };

    SkillOutcome {
        success: true,
        message,
    }
}

pub fn is_battle_over(state: &BattleState) -> BattleStatus {
    let allies_alive = state.allies.iter().any(Unit::is_alive);
    let enemies_alive = state.enemies.iter().any(Unit::is_alive);
    match (allies_alive, enemies_alive) {
        (true, true) => BattleStatus {
            over: false,
            winner: None,
        },
        (true, false) => BattleStatus {
            over: true,
            winner: Some(Winner::Allies),
        },
        (false, true) => BattleStatus {
            over: true,
            winner: Some(Winner::Enemies),
        },
        (false, false) => BattleStatus {
            over: true,
            winner: None,
        },
    }
}

/// Moves the cursor to the next living actor, wrapping around.
///
/// If nobody is alive the cursor ends where it started.
pub fn advance_turn(mut state: BattleState) -> BattleState {
    let len = state.turn_order.len();
    let mut next = state.turn_index;
    for _ in 0..len {
        next = (next + 1) % len;
        let alive = state
            .unit(state.turn_order[next])
            .is_some_and(Unit::is_alive);
        if alive {
            tracing::trace!(from = state.turn_index, to = next, "turn advanced");
            state.turn_index = next;
            return state;
        }
    }
    state
}

/// Basic attack between living units on opposite sides, logged.
///
/// Returns `None` (and changes nothing) for an illegal pairing.
pub fn perform_attack(
    state: &mut BattleState,
    attacker: BattleActor,
    target: BattleActor,
) -> Option<u32> {
    if attacker.side == target.side {
        return None;
    }
    let (attacker_unit, target_unit) = units_pair_mut(state, attacker, target)?;
    if !attacker_unit.is_alive() || !target_unit.is_alive() {
        return None;
    }
    let damage = apply_attack(attacker_unit, target_unit);
    let message = format!(
        "{} attacks! {} takes {} damage!",
        attacker_unit.name, target_unit.name, damage
    );
    state.push_log(message);
    Some(damage)
}

/// Fixed enemy policy: a basic attack on the first living ally.
pub fn run_enemy_action(state: &mut BattleState) -> Option<u32> {
    let actor = state.current_actor()?;
    if actor.side != Side::Enemy {
        return None;
    }
    let target = select_first_alive(&state.allies)?;
    perform_attack(state, actor, BattleActor::ally(target))
}

/// Resolves a skill between battle participants and logs the outcome.
///
/// Returns `None` when the skill or either unit is missing, the target is
/// dead, or the target is on the wrong side for the skill kind. A returned
/// outcome with `success == false` means MP ran short; it is logged but
/// nothing else changes.
pub fn resolve_skill(
    state: &mut BattleState,
    caster: BattleActor,
    skill_id: &str,
    target: BattleActor,
) -> Option<SkillOutcome> {
    let skill = state.unit(caster)?.skill(skill_id)?.clone();
    let wants_same_side = skill.targets_allies();
    if (caster.side == target.side) != wants_same_side {
        return None;
    }
    if !state.unit(caster)?.is_alive() || !state.unit(target)?.is_alive() {
        return None;
    }

    let outcome = if caster == target {
        use_skill(state.unit_mut(caster)?, &skill, SkillTarget::Caster)
    } else {
        let (caster_unit, target_unit) = units_pair_mut(state, caster, target)?;
        use_skill(caster_unit, &skill, SkillTarget::Other(target_unit))
    };
    state.push_log(outcome.message.clone());
    Some(outcome)
}

/// Applies an item from `user` to a living ally and logs it.
pub fn use_item_in_battle(
    state: &mut BattleState,
    user: usize,
    item: &Item,
    target: usize,
) -> Option<ItemUse> {
    let user_name = state.allies.get(user).filter(|u| u.is_alive())?.name.clone();
    let target_unit = state.allies.get_mut(target).filter(|u| u.is_alive())?;
    let used = apply_item_effect(item, target_unit);
    state.push_log(format!("{} uses {}! {}", user_name, item.name, used.message));
    Some(used)
}

fn units_pair_mut(
    state: &mut BattleState,
    a: BattleActor,
    b: BattleActor,
) -> Option<(&mut Unit, &mut Unit)> {
    match (a.side, b.side) {
        (Side::Ally, Side::Enemy) => Some((
            state.allies.get_mut(a.index)?,
            state.enemies.get_mut(b.index)?,
        )),
        (Side::Enemy, Side::Ally) => Some((
            state.enemies.get_mut(a.index)?,
            state.allies.get_mut(b.index)?,
        )),
        (Side::Ally, Side::Ally) => pair_mut(&mut state.allies, a.index, b.index),
        (Side::Enemy, Side::Enemy) => pair_mut(&mut state.enemies, a.index, b.index),
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
