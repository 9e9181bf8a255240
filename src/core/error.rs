//! Rejection reasons.
//!
//! Every action either resolves completely or returns one of these errors
//! with the match state untouched. None of them are fatal: the caller simply
//! chooses another action.

use thiserror::Error;

use super::entity::EntityId;
use super::player::PlayerId;
use super::position::Position;
use crate::cards::CardId;

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the match is over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("actions are only accepted during the action phase")]
    NotInActionPhase,

    #[error("{0} is not in hand")]
    CardNotInHand(CardId),

    #[error("{0} is not in the card catalog")]
    UnknownCard(CardId),

    #[error("{0} cannot be played this way")]
    WrongCardKind(CardId),

    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: i32, available: i32 },

    #[error("no free cell in the deployment zone")]
    NoDeploymentSpace,

    #[error("{0} is outside the board")]
    OutOfBounds(Position),

    #[error("{0} is already occupied")]
    PositionOccupied(Position),

    #[error("{0} is outside the deployment zone")]
    OutsideDeploymentZone(Position),

    #[error("this tactic needs a target")]
    TargetRequired,

    #[error("invalid target at {0}")]
    InvalidTarget(Position),

    #[error("the tactic effect could not resolve")]
    EffectFailed,

    #[error("{0} is not on the board")]
    NoSuchOccupant(EntityId),

    #[error("{0} does not belong to the acting player")]
    NotOwner(EntityId),

    #[error("fortifications cannot move")]
    CannotMove,

    #[error("{0} has already moved this turn")]
    AlreadyMoved(EntityId),

    #[error("{to} is out of movement range")]
    OutOfMoveRange { to: Position },

    #[error("{0} cannot attack this turn")]
    CannotAttack(EntityId),

    #[error("target is out of attack range")]
    OutOfAttackRange,

    #[error("cannot attack a friendly target")]
    FriendlyTarget,

    #[error("an adjacent taunt unit must be attacked first")]
    TauntRedirect,

    #[error("the ability does not apply to {0}")]
    AbilityNotApplicable(EntityId),
}

/// Errors raised while building the card catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card id {0} is already registered")]
    DuplicateId(CardId),

    #[error("unknown effect type `{0}`")]
    UnknownEffectType(String),
}
