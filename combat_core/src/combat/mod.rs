//! CombatSession - The battle state machine and everything it reports
//!
//! A session owns the party, the monsters and the status tracker for the
//! lifetime of one battle. Callers drive it with discrete actions and read
//! back a [`BattleView`] and [`CombatEvent`]s.

mod error;
mod event;
mod monster_turn;
mod result;
mod session;
mod view;

pub use error::ActionError;
pub use event::{CombatEvent, DamageKind, DodgeKind, HealKind};
pub use result::{BattleResult, Rewards};
pub use session::{BattleOutcome, CombatSession};
pub use view::{BattleView, MemberView, MonsterView};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a battle is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    /// Created, no monsters yet
    Idle,
    /// Waiting for the current party member's action
    PartyTurn,
    /// Monsters act next; no party input is accepted
    MonsterTurn,
    Victory,
    Defeat,
    Fled,
}

impl BattlePhase {
    /// Whether the battle has started and not yet ended
    pub fn is_active(self) -> bool {
        matches!(self, BattlePhase::PartyTurn | BattlePhase::MonsterTurn)
    }

    pub fn is_over(self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Fled)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BattlePhase::Idle => "Idle",
            BattlePhase::PartyTurn => "Party turn",
            BattlePhase::MonsterTurn => "Monster turn",
            BattlePhase::Victory => "Victory",
            BattlePhase::Defeat => "Defeat",
            BattlePhase::Fled => "Fled",
        };
        write!(f, "{label}")
    }
}
