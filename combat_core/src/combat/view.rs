//! BattleView - Read-only projection of a session for rendering

use super::BattlePhase;
use crate::types::Job;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterView {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    /// Status labels ("Burn 5", "Frozen", ...)
    pub statuses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub name: String,
    pub job: Job,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub alive: bool,
    pub statuses: Vec<String>,
}

/// Everything a battle screen needs, detached from the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleView {
    pub phase: BattlePhase,
    pub round: u32,
    pub monsters: Vec<MonsterView>,
    pub party: Vec<MemberView>,
    /// Party member whose action is awaited
    pub current_actor: Option<usize>,
    pub target: usize,
    pub defending: bool,
    pub log: Vec<String>,
}

impl BattleView {
    /// The last `count` log lines
    pub fn recent_log(&self, count: usize) -> &[String] {
        let start = self.log.len().saturating_sub(count);
        &self.log[start..]
    }

    pub fn living_monsters(&self) -> usize {
        self.monsters.iter().filter(|m| m.alive).count()
    }
}
