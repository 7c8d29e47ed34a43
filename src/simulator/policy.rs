//! Fixed auto-play policy.
//!
//! Hire the configured party, walk the dungeon forward, pick up whatever is
//! lying around, rest at every spring, and fight everything. In battle the
//! acting ally heals a badly hurt friend first, otherwise it hits the first
//! living enemy with its strongest affordable attack.

use super::config::SimConfig;
use crate::battle::{select_first_alive, BattleActor, BattleState};
use crate::core::{ActionRejected, BattleCommand, EventResponse, GameSession, Location, Mode};
use crate::dungeon::{Direction, EventKind};
use crate::inventory::Inventory;
use crate::units::{Party, SkillKind, Unit};
use rand::Rng;

/// Healing items in the order the policy spends them.
const HEALING_ITEMS: [&str; 3] = ["herb", "potion", "high_potion"];

/// One session action chosen by the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Hire(String),
    EnterDungeon,
    Collect,
    UseItem { item_id: String, member: usize },
    Move(Direction),
    Respond(EventResponse),
    Battle(BattleCommand),
    EnemyTurn,
}

impl PlannedAction {
    pub fn apply<R: Rng + ?Sized>(
        self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> Result<(), ActionRejected> {
        match self {
            PlannedAction::Hire(id) => session.hire(&id),
            PlannedAction::EnterDungeon => session.enter_dungeon(),
            PlannedAction::Collect => session.collect_item(rng).map(|_| ()),
            PlannedAction::UseItem { item_id, member } => {
                session.use_item(&item_id, member).map(|_| ())
            }
            PlannedAction::Move(direction) => session.move_in_dungeon(direction, rng).map(|_| ()),
            PlannedAction::Respond(response) => session.respond_to_event(response),
            PlannedAction::Battle(command) => session.ally_action(command).map(|_| ()),
            PlannedAction::EnemyTurn => session.run_enemy_turn().map(|_| ()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoPolicy {
    party: Vec<String>,
    heal_threshold_pct: u32,
}

impl AutoPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            party: config.party.clone(),
            heal_threshold_pct: config.heal_threshold_pct,
        }
    }

    /// Next action for the session, or `None` once the game has ended.
    pub fn next_action(&self, session: &GameSession) -> Option<PlannedAction> {
        let state = session.state();
        match &state.mode {
            Mode::Clear | Mode::GameOver => None,
            Mode::Event(event) => Some(PlannedAction::Respond(match event.kind {
                EventKind::Water => EventResponse::Camp,
                _ => EventResponse::Fight,
            })),
            Mode::Battle(battle) => {
                if !session.is_ally_turn() {
                    return Some(PlannedAction::EnemyTurn);
                }
                let actor = session.current_actor()?;
                self.battle_command(battle, actor, &state.inventory)
                    .map(PlannedAction::Battle)
            }
            Mode::Field => match &state.location {
                Location::Town => Some(self.town_action(&state.party)),
                Location::Dungeon(dungeon) => {
                    if dungeon.can_collect_item {
                        return Some(PlannedAction::Collect);
                    }
                    if let Some(action) = self.field_heal(&state.party, &state.inventory) {
                        return Some(action);
                    }
                    let direction = if dungeon.can_move_forward() {
                        Direction::Forward
                    } else {
                        Direction::Backward
                    };
                    Some(PlannedAction::Move(direction))
                }
                // Cave battles always end the game.
                Location::Cave => None,
            },
        }
    }

    fn town_action(&self, party: &Party) -> PlannedAction {
        self.party
            .iter()
            .find(|id| party.has_room() && !party.contains(id))
            .map(|id| PlannedAction::Hire(id.clone()))
            .unwrap_or(PlannedAction::EnterDungeon)
    }

    fn field_heal(&self, party: &Party, inventory: &Inventory) -> Option<PlannedAction> {
        let member = party.members().position(|m| self.needs_healing(m))?;
        let item_id = healing_item_in_stock(inventory)?;
        Some(PlannedAction::UseItem {
            item_id: item_id.to_string(),
            member,
        })
    }

    fn battle_command(
        &self,
        battle: &BattleState,
        actor: BattleActor,
        inventory: &Inventory,
    ) -> Option<BattleCommand> {
        let unit = battle.unit(actor)?;

        if let Some(patient) = battle.allies.iter().position(|a| self.needs_healing(a)) {
            let heal = unit
                .skills
                .iter()
                .filter(|s| s.kind == SkillKind::Heal && s.mp_cost <= unit.mp)
                .max_by_key(|s| s.heal_amount());
            if let Some(skill) = heal {
                return Some(BattleCommand::Skill {
                    skill_id: skill.id.clone(),
                    target: BattleActor::ally(patient),
                });
            }
            if let Some(item_id) = healing_item_in_stock(inventory) {
                return Some(BattleCommand::Item {
                    item_id: item_id.to_string(),
                    target: patient,
                });
            }
        }

        let target = select_first_alive(&battle.enemies)?;
        let strike = unit
            .skills
            .iter()
            .filter(|s| s.kind == SkillKind::Attack && s.mp_cost <= unit.mp && s.damage > 0)
            .max_by_key(|s| s.damage);
        Some(match strike {
            Some(skill) => BattleCommand::Skill {
                skill_id: skill.id.clone(),
                target: BattleActor::enemy(target),
            },
            None => BattleCommand::Attack { target },
        })
    }

    fn needs_healing(&self, unit: &Unit) -> bool {
        unit.is_alive() && unit.hp * 100 < unit.max_hp * self.heal_threshold_pct
    }
}

fn healing_item_in_stock(inventory: &Inventory) -> Option<&'static str> {
    HEALING_ITEMS
        .into_iter()
        .find(|id| inventory.quantity(id) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::dungeon::create_dungeon;

    fn policy() -> AutoPolicy {
        AutoPolicy::from_config(&SimConfig::default())
    }

    #[test]
    fn test_hires_configured_party_then_enters_dungeon() {
        let policy = policy();
        let mut session = GameSession::new();
        let mut hired = Vec::new();
        loop {
            match policy.next_action(&session).unwrap() {
                PlannedAction::Hire(id) => {
                    hired.push(id.clone());
                    session.hire(&id).unwrap();
                }
                other => {
                    assert_eq!(other, PlannedAction::EnterDungeon);
                    break;
                }
            }
        }
        assert_eq!(hired, vec!["warrior", "monk", "mage"]);
    }

    #[test]
    fn test_collects_before_moving() {
        let mut state = GameState::new();
        let mut dungeon = create_dungeon();
        dungeon.can_collect_item = true;
        state.location = Location::Dungeon(dungeon);
        let session = GameSession::from_state(state);
        assert_eq!(policy().next_action(&session), Some(PlannedAction::Collect));
    }

    #[test]
    fn test_heals_wounded_member_in_field() {
        let mut state = GameState::new();
        state.location = Location::Dungeon(create_dungeon());
        state.party.hero.hp = 5;
        let session = GameSession::from_state(state);
        assert_eq!(
            policy().next_action(&session),
            Some(PlannedAction::UseItem {
                item_id: "potion".to_string(),
                member: 0,
            })
        );
    }

    #[test]
    fn test_walks_forward_when_healthy() {
        let mut state = GameState::new();
        state.location = Location::Dungeon(create_dungeon());
        let session = GameSession::from_state(state);
        assert_eq!(
            policy().next_action(&session),
            Some(PlannedAction::Move(Direction::Forward))
        );
    }

    #[test]
    fn test_stops_on_terminal_modes() {
        let mut state = GameState::new();
        state.mode = Mode::GameOver;
        assert!(policy()
            .next_action(&GameSession::from_state(state))
            .is_none());
    }

    #[test]
    fn test_hero_opens_with_strongest_affordable_attack() {
        let mut state = GameState::new();
        state.location = Location::Dungeon(create_dungeon());
        state.mode = Mode::Battle(crate::battle::start_battle(
            &state.party,
            &[crate::units::create_mid_boss()],
        ));
        let session = GameSession::from_state(state);
        assert_eq!(
            policy().next_action(&session),
            Some(PlannedAction::Battle(BattleCommand::Skill {
                skill_id: "hero-slash".to_string(),
                target: BattleActor::enemy(0),
            }))
        );
    }

    #[test]
    fn test_hero_heals_self_when_low() {
        let mut state = GameState::new();
        state.location = Location::Dungeon(create_dungeon());
        state.party.hero.hp = 8;
        state.mode = Mode::Battle(crate::battle::start_battle(
            &state.party,
            &[crate::units::create_mid_boss()],
        ));
        let session = GameSession::from_state(state);
        assert_eq!(
            policy().next_action(&session),
            Some(PlannedAction::Battle(BattleCommand::Skill {
                skill_id: "hero-heal".to_string(),
                target: BattleActor::ally(0),
            }))
        );
    }
}
