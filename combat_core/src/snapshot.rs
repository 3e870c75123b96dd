//! GameSnapshot - The persisted game state the engine loads and writes back
//!
//! A snapshot never contains an active battle. While a battle runs, the
//! party and potions are owned by the [`CombatSession`] and equipment
//! changes are refused.

use crate::character::Character;
use crate::combat::{BattleOutcome, BattleResult, CombatSession};
use crate::config::{ConfigError, GameData};
use crate::item::{slot_rules, EquipError, InstanceId, InstanceIdGenerator, ItemInstance, Potion};
use crate::rng::CombatRng;
use crate::set_bonus::SetBonusTable;
use crate::stat_block::effective_stats;
use crate::types::{EquipSlot, FlatStats, Job};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to (de)serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item instance {0} appears more than once")]
    DuplicateInstance(InstanceId),
    #[error("a battle is in progress")]
    BattleInProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub party: Vec<Character>,
    /// Unequipped gear
    #[serde(default)]
    pub bag: Vec<ItemInstance>,
    #[serde(default)]
    pub potions: Vec<Potion>,
    #[serde(default)]
    pub gold: u32,
    /// Dungeon floor
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_next_instance_id")]
    pub next_instance_id: u64,
    #[serde(skip)]
    battle_active: bool,
}

fn default_depth() -> u32 {
    1
}

fn default_next_instance_id() -> u64 {
    1
}

/// Starting roster: name, job, base stats, starter gear
const STARTING_PARTY: [(&str, &str, Job, FlatStats, [&str; 2]); 3] = [
    (
        "p1",
        "Bork",
        Job::Fighter,
        FlatStats {
            attack: 12,
            defense: 8,
            hp: 50,
            mp: 0,
            speed: 8,
        },
        ["rusty_sword", "leather_vest"],
    ),
    (
        "p2",
        "Pyra",
        Job::Mage,
        FlatStats {
            attack: 4,
            defense: 4,
            hp: 30,
            mp: 40,
            speed: 6,
        },
        ["wooden_staff", "cloth_robe"],
    ),
    (
        "p3",
        "Milo",
        Job::Monk,
        FlatStats {
            attack: 10,
            defense: 6,
            hp: 45,
            mp: 10,
            speed: 12,
        },
        ["brass_knuckles", "leather_vest"],
    ),
];

const STARTING_POTION: &str = "minor_health_potion";
const STARTING_POTION_COUNT: usize = 2;

impl GameSnapshot {
    /// A fresh game at depth 1: three adventurers in starter gear, two
    /// minor health potions, no gold.
    pub fn new_game(data: &GameData) -> Result<Self, ConfigError> {
        let missing = |id: &str| ConfigError::ValidationError(format!("starting item '{id}' is not in the catalog"));
        let mut ids = InstanceIdGenerator::default();
        let mut party = Vec::with_capacity(STARTING_PARTY.len());

        for (id, name, job, base, gear) in STARTING_PARTY {
            let mut member = Character::new(id, name, job, base);
            for item_id in gear {
                let template = data.equipment.get(item_id).ok_or_else(|| missing(item_id))?;
                let slot = template.kind.slots().first().copied().ok_or_else(|| missing(item_id))?;
                member
                    .equipment
                    .insert(slot, ItemInstance::new(ids.issue(), template.clone()));
            }
            let stats = effective_stats(&member, &data.sets);
            member.hp = stats.max_hp;
            member.mp = stats.max_mp;
            party.push(member);
        }

        let potion = data.potions.get(STARTING_POTION).ok_or_else(|| missing(STARTING_POTION))?;

        Ok(GameSnapshot {
            party,
            bag: Vec::new(),
            potions: vec![potion.clone(); STARTING_POTION_COUNT],
            gold: 0,
            depth: 1,
            next_instance_id: ids.peek(),
            battle_active: false,
        })
    }

    pub fn is_battle_active(&self) -> bool {
        self.battle_active
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        if self.battle_active {
            return Err(SnapshotError::BattleInProgress);
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot. Missing equipment slots load as empty and the next
    /// instance id is moved past every id in use.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: GameSnapshot = serde_json::from_str(json)?;
        let mut seen = BTreeSet::new();
        for id in snapshot.instance_ids() {
            if !seen.insert(id) {
                return Err(SnapshotError::DuplicateInstance(id));
            }
        }
        if let Some(InstanceId(max)) = seen.last() {
            snapshot.next_instance_id = snapshot.next_instance_id.max(max + 1);
        }
        Ok(snapshot)
    }

    /// Every item instance id in the bag and on the party
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        let worn = self
            .party
            .iter()
            .flat_map(|c| c.equipment.iter().map(|(_, item)| item.instance_id));
        self.bag.iter().map(|item| item.instance_id).chain(worn).collect()
    }

    /// Move `instance` from the bag into `slot` of party member `member`.
    /// Whatever was in the slot goes back to the bag.
    pub fn equip(
        &mut self,
        member: usize,
        slot: EquipSlot,
        instance: InstanceId,
        sets: &SetBonusTable,
    ) -> Result<(), EquipError> {
        if self.battle_active {
            return Err(EquipError::BattleInProgress);
        }
        let character = self.party.get(member).ok_or(EquipError::NoSuchMember(member))?;
        let position = self
            .bag
            .iter()
            .position(|item| item.instance_id == instance)
            .ok_or(EquipError::NotInBag(instance))?;
        slot_rules::validate_equip(character.job, slot, &self.bag[position].template)?;

        let item = self.bag.remove(position);
        let character = &mut self.party[member];
        if let Some(previous) = character.equipment.insert(slot, item) {
            self.bag.push(previous);
        }
        let stats = effective_stats(character, sets);
        character.clamp_resources(stats.max_hp, stats.max_mp);
        Ok(())
    }

    /// Move the item in `slot` of party member `member` to the bag
    pub fn unequip(&mut self, member: usize, slot: EquipSlot, sets: &SetBonusTable) -> Result<InstanceId, EquipError> {
        if self.battle_active {
            return Err(EquipError::BattleInProgress);
        }
        let character = self.party.get_mut(member).ok_or(EquipError::NoSuchMember(member))?;
        let item = character.equipment.remove(slot).ok_or(EquipError::EmptySlot(slot))?;
        let stats = effective_stats(character, sets);
        character.clamp_resources(stats.max_hp, stats.max_mp);

        let id = item.instance_id;
        self.bag.push(item);
        Ok(id)
    }

    /// Hand the party and potions to a new idle battle at the current depth
    pub fn start_battle<R: CombatRng>(&mut self, data: Arc<GameData>, rng: R) -> Result<CombatSession<R>, SnapshotError> {
        if self.battle_active {
            return Err(SnapshotError::BattleInProgress);
        }
        self.battle_active = true;
        let party = std::mem::take(&mut self.party);
        let potions = std::mem::take(&mut self.potions);
        Ok(CombatSession::new(data, party, potions, self.depth, rng)
            .with_instance_ids(InstanceIdGenerator::starting_at(self.next_instance_id)))
    }

    /// Take the party back from a finished battle and bank any rewards
    pub fn finish_battle(&mut self, outcome: BattleOutcome) -> BattleResult {
        self.party = outcome.party;
        self.potions = outcome.potions;
        self.next_instance_id = self.next_instance_id.max(outcome.next_instance_id);
        self.battle_active = false;

        if let BattleResult::Victory(rewards) = &outcome.result {
            self.gold = self.gold.saturating_add(rewards.gold);
            self.bag.extend(rewards.equipment.iter().cloned());
            self.potions.extend(rewards.potions.iter().cloned());
            info!(
                gold = rewards.gold,
                items = rewards.equipment.len(),
                potions = rewards.potions.len(),
                "rewards banked"
            );
        }
        outcome.result
    }
}
