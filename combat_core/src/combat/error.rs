//! Rejected battle actions

use super::BattlePhase;
use crate::types::CombatantId;
use thiserror::Error;

/// An action the engine refused. Battle state is unchanged and the
/// actor keeps their turn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("{actor} needs {cost} MP for {ability} but has {available}")]
    InsufficientMp {
        actor: String,
        ability: String,
        cost: i32,
        available: i32,
    },
    #[error("target {0:?} is already defeated")]
    DeadTarget(CombatantId),
    #[error("no such target {0:?}")]
    InvalidTarget(CombatantId),
    #[error("this ability needs a target")]
    MissingTarget,
    #[error("unknown ability '{0}' for this character")]
    UnknownAbility(String),
    #[error("no potion at position {0}")]
    NoSuchPotion(usize),
    #[error("party member {0} cannot act")]
    ActorCannotAct(usize),
    #[error("not accepting input during {0}")]
    NotAcceptingInput(BattlePhase),
}
