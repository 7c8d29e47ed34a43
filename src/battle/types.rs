use serde::{Deserialize, Serialize};

use crate::core::constants::BATTLE_LOG_DISPLAY_LINES;
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Enemy,
}

/// Positional reference into the battle's ally or enemy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleActor {
    pub side: Side,
    pub index: usize,
}

impl BattleActor {
    pub fn ally(index: usize) -> Self {
        Self {
            side: Side::Ally,
            index,
        }
    }

    pub fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }
}

/// One battle, from the first turn to a terminal outcome.
///
/// `turn_order` is fixed when the battle starts. Dead units keep their slot
/// and are skipped when the turn advances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub allies: Vec<Unit>,
    pub enemies: Vec<Unit>,
    pub turn_order: Vec<BattleActor>,
    pub turn_index: usize,
    /// Append-only.
    pub log: Vec<String>,
}

impl BattleState {
    pub fn unit(&self, actor: BattleActor) -> Option<&Unit> {
        match actor.side {
            Side::Ally => self.allies.get(actor.index),
            Side::Enemy => self.enemies.get(actor.index),
        }
    }

    pub fn unit_mut(&mut self, actor: BattleActor) -> Option<&mut Unit> {
        match actor.side {
            Side::Ally => self.allies.get_mut(actor.index),
            Side::Enemy => self.enemies.get_mut(actor.index),
        }
    }

    pub fn current_actor(&self) -> Option<BattleActor> {
        self.turn_order.get(self.turn_index).copied()
    }

    pub fn push_log(&mut self, message: String) {
        self.log.push(message);
    }

    /// The tail of the log that a display shows.
    pub fn recent_log(&self) -> &[String] {
        let start = self.log.len().saturating_sub(BATTLE_LOG_DISPLAY_LINES);
        &self.log[start..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Allies,
    Enemies,
}

/// Whether a battle has ended and who won.
///
/// `over` with no winner means both sides fell at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleStatus {
    pub over: bool,
    pub winner: Option<Winner>,
}

/// Result of a skill attempt. A failed attempt changes nothing but explains why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillOutcome {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle_with_log(lines: usize) -> BattleState {
        BattleState {
            allies: Vec::new(),
            enemies: Vec::new(),
            turn_order: Vec::new(),
            turn_index: 0,
            log: (0..lines).map(|i| format!("line {i}")).collect(),
        }
    }

    #[test]
    fn test_recent_log_truncates_to_display_lines() {
        let battle = battle_with_log(BATTLE_LOG_DISPLAY_LINES + 4);
        let recent = battle.recent_log();
        assert_eq!(recent.len(), BATTLE_LOG_DISPLAY_LINES);
        assert_eq!(recent[0], "line 4");
        assert_eq!(battle.log.len(), BATTLE_LOG_DISPLAY_LINES + 4);
    }

    #[test]
    fn test_recent_log_short_log_is_whole() {
        let battle = battle_with_log(2);
        assert_eq!(battle.recent_log().len(), 2);
    }

    #[test]
    fn test_current_actor_empty_order() {
        assert!(battle_with_log(0).current_actor().is_none());
    }
}
