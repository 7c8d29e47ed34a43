//! Game session controller.
//!
//! `GameSession` owns the root [`GameState`], routes each player action to
//! the battle, dungeon and inventory engines, and applies the mode change the
//! action implies. One action resolves completely, including any chained
//! transition, before the next is accepted.
//!
//! Every action returns `Result<_, ActionRejected>`. A rejected action leaves
//! the state exactly as it was.

use super::error::ActionRejected;
use super::game_state::{GameState, Location, Mode};
use crate::battle::{
    advance_turn, is_battle_over, perform_attack, resolve_skill, run_enemy_action, start_battle,
    use_item_in_battle, BattleActor, BattleState, BattleStatus, Side, Winner,
};
use crate::dungeon::{
    advance_dungeon_step, camp_at_water, check_dungeon_event, create_dungeon, Direction,
    DungeonState, EventKind,
};
use crate::inventory::{
    add_item_to_inventory, apply_item_effect, get_item, remove_item_from_inventory,
    roll_collected_item, Item, ItemUse,
};
use crate::units::{create_cave_boss, find_candidate, Party, Unit, FINAL_BOSS_ID};
use rand::Rng;
use tracing::{debug, info};

/// What the acting ally does on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleCommand {
    /// Basic attack on an enemy by index.
    Attack { target: usize },
    /// Cast one of the actor's skills. Heals and buffs target allies.
    Skill {
        skill_id: String,
        target: BattleActor,
    },
    /// Use an inventory item on an ally by index.
    Item { item_id: String, target: usize },
}

/// Answer to a pending dungeon event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Rest at water: full restore
    Camp,
    /// Leave the water without resting
    Continue,
    /// Start the battle a boss or encounter event carries
    Fight,
}

/// Outcome of one battle action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Battle log line the action wrote.
    pub message: String,
    /// False only for a skill the caster could not pay for.
    pub turn_consumed: bool,
    /// Battle status right after the action.
    pub status: BattleStatus,
}

/// Outcome of one dungeon move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub step: u32,
    pub event: Option<EventKind>,
    pub can_collect_item: bool,
}

pub struct GameSession {
    state: GameState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Fresh session: hero alone in town with the starting inventory.
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Resume from an existing state (tests, snapshots).
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Back to town with a fresh party and the starting inventory.
    pub fn restart(&mut self) {
        info!(from = self.state.mode.name(), "session restarted");
        self.state = GameState::new();
    }

    // ── Town ───────────────────────────────────────────────────────

    /// Adds a candidate from the hire roster to the party.
    pub fn hire(&mut self, candidate_id: &str) -> Result<(), ActionRejected> {
        self.require_town("hire")?;
        let recruit = find_candidate(candidate_id)
            .ok_or_else(|| rejected(ActionRejected::UnknownCandidate(candidate_id.to_string())))?;
        if !self.state.party.has_room() {
            return Err(rejected(ActionRejected::PartyFull));
        }
        if self.state.party.contains(&recruit.id) {
            return Err(rejected(ActionRejected::AlreadyInParty(recruit.id)));
        }
        debug!(candidate = %recruit.id, "companion hired");
        self.state.party.companions.push(recruit);
        Ok(())
    }

    /// Goes to the cave and starts the cave boss battle at once.
    pub fn enter_cave(&mut self) -> Result<(), ActionRejected> {
        self.require_town("enter cave")?;
        self.state.location = Location::Cave;
        self.begin_battle(vec![create_cave_boss()]);
        Ok(())
    }

    pub fn enter_dungeon(&mut self) -> Result<(), ActionRejected> {
        self.require_town("enter dungeon")?;
        info!("entered dungeon");
        self.state.location = Location::Dungeon(create_dungeon());
        self.state.mode = Mode::Field;
        Ok(())
    }

    // ── Dungeon ────────────────────────────────────────────────────

    /// Leaves the dungeon. Only possible from its entrance; the path is
    /// forgotten.
    pub fn return_to_town(&mut self) -> Result<(), ActionRejected> {
        let dungeon = self.field_dungeon("return to town")?;
        if !dungeon.at_entrance() {
            return Err(rejected(ActionRejected::NotAtEntrance));
        }
        debug!("returned to town");
        self.state.location = Location::Town;
        Ok(())
    }

    /// Moves one step and checks the new step for an event. An event puts
    /// the session into event mode until [`respond_to_event`] answers it.
    ///
    /// [`respond_to_event`]: GameSession::respond_to_event
    pub fn move_in_dungeon<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<MoveReport, ActionRejected> {
        let dungeon = self.field_dungeon("move")?;
        let allowed = match direction {
            Direction::Forward => dungeon.can_move_forward(),
            Direction::Backward => dungeon.can_move_backward(),
        };
        if !allowed {
            return Err(rejected(ActionRejected::OutOfBounds));
        }

        let moved = advance_dungeon_step(dungeon, direction, rng);
        let inventory = std::mem::take(&mut self.state.inventory);
        let check = check_dungeon_event(moved.step, &moved, inventory, rng);
        self.state.inventory = check.inventory;

        let report = MoveReport {
            step: moved.step,
            event: check.event.as_ref().map(|e| e.kind),
            can_collect_item: moved.can_collect_item,
        };
        debug!(step = moved.step, event = ?report.event, "moved in dungeon");

        self.state.location = Location::Dungeon(moved);
        if let Some(event) = check.event {
            self.state.mode = Mode::Event(event);
        }
        Ok(report)
    }

    pub fn respond_to_event(&mut self, response: EventResponse) -> Result<(), ActionRejected> {
        let event = self
            .state
            .event()
            .ok_or_else(|| rejected(ActionRejected::WrongMode { action: "respond" }))?;

        match (event.kind, response) {
            (EventKind::Water, EventResponse::Camp) => {
                debug!("camped at water");
                self.state.party = camp_at_water(&self.state.party);
                self.state.mode = Mode::Field;
            }
            (EventKind::Water, EventResponse::Continue) => {
                self.state.mode = Mode::Field;
            }
            (kind, EventResponse::Fight) if kind.starts_battle() => {
                let enemy = event
                    .enemy
                    .clone()
                    .ok_or_else(|| rejected(ActionRejected::InvalidResponse))?;
                self.begin_battle(vec![enemy]);
            }
            _ => return Err(rejected(ActionRejected::InvalidResponse)),
        }
        Ok(())
    }

    /// Picks up the item on the current step, once per arrival.
    pub fn collect_item<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&'static Item, ActionRejected> {
        if !self.field_dungeon("collect")?.can_collect_item {
            return Err(rejected(ActionRejected::NothingToCollect));
        }
        let item = roll_collected_item(rng);
        self.state.inventory = add_item_to_inventory(&self.state.inventory, item.id, 1);
        if let Location::Dungeon(dungeon) = &mut self.state.location {
            dungeon.can_collect_item = false;
        }
        self.state.collected_item = Some(item.id.to_string());
        debug!(item = item.id, "item collected");
        Ok(item)
    }

    /// Dismisses the pickup notification.
    pub fn clear_collected_item(&mut self) {
        self.state.collected_item = None;
    }

    // ── Items ──────────────────────────────────────────────────────

    /// Uses an item on a living party member outside battle. Index 0 is the
    /// hero.
    pub fn use_item(
        &mut self,
        item_id: &str,
        member_index: usize,
    ) -> Result<ItemUse, ActionRejected> {
        if self.state.mode != Mode::Field {
            return Err(rejected(ActionRejected::WrongMode { action: "use item" }));
        }
        let item = self.stocked_item(item_id)?;
        let member = self
            .state
            .party
            .member_mut(member_index)
            .filter(|m| m.is_alive())
            .ok_or_else(|| rejected(ActionRejected::InvalidTarget))?;
        let used = apply_item_effect(item, member);
        self.state.inventory = remove_item_from_inventory(&self.state.inventory, item.id, 1);
        debug!(item = item.id, member_index, restored = used.restored, "item used");
        Ok(used)
    }

    // ── Battle ─────────────────────────────────────────────────────

    pub fn current_actor(&self) -> Option<BattleActor> {
        self.state.battle()?.current_actor()
    }

    /// True when a living ally is waiting for a command.
    pub fn is_ally_turn(&self) -> bool {
        self.state.battle().is_some_and(|battle| {
            battle
                .current_actor()
                .filter(|a| a.side == Side::Ally)
                .and_then(|a| battle.unit(a))
                .is_some_and(Unit::is_alive)
        })
    }

    /// Resolves the current ally's command, then ends the battle or passes
    /// the turn on.
    pub fn ally_action(&mut self, command: BattleCommand) -> Result<TurnReport, ActionRejected> {
        let actor = self.ally_actor()?;
        let (message, turn_consumed) = match command {
            BattleCommand::Attack { target } => {
                let battle = self.battle_mut("attack")?;
                perform_attack(battle, actor, BattleActor::enemy(target))
                    .ok_or_else(|| rejected(ActionRejected::InvalidTarget))?;
                (last_log_line(battle), true)
            }
            BattleCommand::Skill { skill_id, target } => {
                let battle = self.battle_mut("skill")?;
                if battle.unit(actor).and_then(|u| u.skill(&skill_id)).is_none() {
                    return Err(rejected(ActionRejected::UnknownSkill(skill_id)));
                }
                let outcome = resolve_skill(battle, actor, &skill_id, target)
                    .ok_or_else(|| rejected(ActionRejected::InvalidTarget))?;
                (outcome.message, outcome.success)
            }
            BattleCommand::Item { item_id, target } => {
                let item = self.stocked_item(&item_id)?;
                let battle = self.battle_mut("item")?;
                use_item_in_battle(battle, actor.index, item, target)
                    .ok_or_else(|| rejected(ActionRejected::InvalidTarget))?;
                let message = last_log_line(battle);
                self.state.inventory = remove_item_from_inventory(&self.state.inventory, item.id, 1);
                (message, true)
            }
        };
        debug!(?actor, turn_consumed, "ally acted");
        self.conclude_action(message, turn_consumed)
    }

    /// Runs the fixed enemy policy for the enemy whose turn it is.
    pub fn run_enemy_turn(&mut self) -> Result<TurnReport, ActionRejected> {
        let battle = self.battle_mut("enemy turn")?;
        run_enemy_action(battle).ok_or_else(|| rejected(ActionRejected::NotYourTurn))?;
        let message = last_log_line(battle);
        self.conclude_action(message, true)
    }

    fn conclude_action(
        &mut self,
        message: String,
        turn_consumed: bool,
    ) -> Result<TurnReport, ActionRejected> {
        let status = {
            let battle = self.battle_mut("battle")?;
            let status = is_battle_over(battle);
            if !status.over && turn_consumed {
                *battle = advance_turn(std::mem::take(battle));
            }
            status
        };
        if status.over {
            self.finish_battle(status);
        }
        Ok(TurnReport {
            message,
            turn_consumed,
            status,
        })
    }

    fn begin_battle(&mut self, enemies: Vec<Unit>) {
        let mut battle = start_battle(&self.state.party, &enemies);
        // Fallen companions keep their slot; the opener may be one of them.
        let opener_alive = battle
            .current_actor()
            .and_then(|a| battle.unit(a))
            .is_some_and(Unit::is_alive);
        if !opener_alive {
            battle = advance_turn(battle);
        }
        info!(
            enemies = ?enemies.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            "battle started"
        );
        self.state.mode = Mode::Battle(battle);
    }

    /// Writes ally hp/mp back into the party and picks the next mode.
    ///
    /// A battle with no winner counts as a loss.
    fn finish_battle(&mut self, status: BattleStatus) {
        let Mode::Battle(battle) = std::mem::replace(&mut self.state.mode, Mode::Field) else {
            return;
        };
        sync_party(&mut self.state.party, &battle.allies);

        let next = match status.winner {
            Some(Winner::Allies) => match self.state.location {
                Location::Dungeon(_) if battle.enemies.iter().any(|e| e.id == FINAL_BOSS_ID) => {
                    Mode::Clear
                }
                Location::Dungeon(_) => Mode::Field,
                _ => Mode::Clear,
            },
            Some(Winner::Enemies) | None => Mode::GameOver,
        };
        info!(winner = ?status.winner, next = next.name(), "battle finished");
        self.state.mode = next;
    }

    fn ally_actor(&self) -> Result<BattleActor, ActionRejected> {
        if self.state.battle().is_none() {
            return Err(rejected(ActionRejected::WrongMode {
                action: "battle command",
            }));
        }
        if !self.is_ally_turn() {
            return Err(rejected(ActionRejected::NotYourTurn));
        }
        self.current_actor()
            .ok_or_else(|| rejected(ActionRejected::NotYourTurn))
    }

    fn battle_mut(&mut self, action: &'static str) -> Result<&mut BattleState, ActionRejected> {
        match &mut self.state.mode {
            Mode::Battle(battle) => Ok(battle),
            _ => Err(rejected(ActionRejected::WrongMode { action })),
        }
    }

    fn field_dungeon(&self, action: &'static str) -> Result<&DungeonState, ActionRejected> {
        match (&self.state.location, &self.state.mode) {
            (Location::Dungeon(dungeon), Mode::Field) => Ok(dungeon),
            _ => Err(rejected(ActionRejected::WrongMode { action })),
        }
    }

    fn require_town(&self, action: &'static str) -> Result<(), ActionRejected> {
        if self.state.in_town() {
            Ok(())
        } else {
            Err(rejected(ActionRejected::WrongMode { action }))
        }
    }

    fn stocked_item(&self, item_id: &str) -> Result<&'static Item, ActionRejected> {
        let item =
            get_item(item_id).ok_or_else(|| rejected(ActionRejected::UnknownItem(item_id.into())))?;
        if self.state.inventory.quantity(item.id) == 0 {
            return Err(rejected(ActionRejected::OutOfStock(item.id.to_string())));
        }
        Ok(item)
    }
}

fn rejected(reason: ActionRejected) -> ActionRejected {
    debug!(%reason, "action rejected");
    reason
}

fn last_log_line(battle: &BattleState) -> String {
    battle.log.last().cloned().unwrap_or_default()
}

/// Allies are laid out hero first, then companions, same as the party.
fn sync_party(party: &mut Party, allies: &[Unit]) {
    for (index, ally) in allies.iter().enumerate() {
        if let Some(member) = party.member_mut(index) {
            member.hp = ally.hp;
            member.mp = ally.mp;
        }
    }
}
