use thiserror::Error;

/// Why the session refused a player action. A refused action leaves the game
/// state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("{action} is not available right now")]
    WrongMode { action: &'static str },

    #[error("the party already has the maximum number of companions")]
    PartyFull,

    #[error("{0} is already in the party")]
    AlreadyInParty(String),

    #[error("no hire candidate named {0}")]
    UnknownCandidate(String),

    #[error("it is not that side's turn")]
    NotYourTurn,

    #[error("invalid target")]
    InvalidTarget,

    #[error("the acting unit has no skill {0}")]
    UnknownSkill(String),

    #[error("unknown item {0}")]
    UnknownItem(String),

    #[error("no {0} left")]
    OutOfStock(String),

    #[error("there is nothing to collect here")]
    NothingToCollect,

    #[error("can only leave the dungeon from its entrance")]
    NotAtEntrance,

    #[error("cannot move that way")]
    OutOfBounds,

    #[error("that response does not fit this event")]
    InvalidResponse,
}
