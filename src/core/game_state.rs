use serde::{Deserialize, Serialize};

use crate::battle::BattleState;
use crate::dungeon::{DungeonState, EventState};
use crate::inventory::{starting_inventory, Inventory};
use crate::units::{create_initial_party, Party};

/// Where the party is. The dungeon path only exists while inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Town,
    Cave,
    Dungeon(DungeonState),
}

/// What the player is doing. Each mode carries only its own data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Field,
    Battle(BattleState),
    Event(EventState),
    Clear,
    GameOver,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Field => "field",
            Mode::Battle(_) => "battle",
            Mode::Event(_) => "event",
            Mode::Clear => "clear",
            Mode::GameOver => "game over",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Clear | Mode::GameOver)
    }
}

/// Root state of one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub location: Location,
    pub mode: Mode,
    pub party: Party,
    pub inventory: Inventory,
    /// Item id of the last pickup, shown until the caller clears it.
    #[serde(default)]
    pub collected_item: Option<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            location: Location::Town,
            mode: Mode::Field,
            party: create_initial_party(),
            inventory: starting_inventory(),
            collected_item: None,
        }
    }

    pub fn dungeon(&self) -> Option<&DungeonState> {
        match &self.location {
            Location::Dungeon(d) => Some(d),
            _ => None,
        }
    }

    pub fn battle(&self) -> Option<&BattleState> {
        match &self.mode {
            Mode::Battle(b) => Some(b),
            _ => None,
        }
    }

    pub fn event(&self) -> Option<&EventState> {
        match &self.mode {
            Mode::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn in_town(&self) -> bool {
        self.location == Location::Town && self.mode == Mode::Field
    }
}
