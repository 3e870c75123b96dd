//! Game state - camp, battle and equipment screens over one snapshot

use combat_core::ability::Ability;
use combat_core::combat::BattleOutcome;
use combat_core::config::ConfigError;
use combat_core::item::slot_rules;
use combat_core::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const MAX_MESSAGES: usize = 6;

/// Current screen in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Camp,
    Battle,
    Equipment,
}

/// Which list has focus on the equipment screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipFocus {
    Slots,
    Bag,
}

pub struct GameState {
    pub data: Arc<GameData>,
    pub snapshot: GameSnapshot,
    pub battle: Option<CombatSession<ChaCha8Rng>>,
    pub screen: Screen,
    pub messages: Vec<String>,

    // Battle UI
    pub selected_ability: usize,
    pub selected_potion: usize,

    // Equipment UI
    pub member_index: usize,
    pub slot_index: usize,
    pub bag_index: usize,
    pub equip_focus: EquipFocus,

    rng: ChaCha8Rng,
    save_path: PathBuf,
}

impl GameState {
    /// Resume from `save_path` if it holds a snapshot, else start a new game
    pub fn new(data: GameData, seed: u64, save_path: PathBuf) -> Result<Self, ConfigError> {
        let mut messages = Vec::new();
        let snapshot = match fs::read_to_string(&save_path) {
            Ok(json) => match GameSnapshot::from_json(&json) {
                Ok(snapshot) => {
                    messages.push(format!("Loaded {}", save_path.display()));
                    snapshot
                }
                Err(e) => {
                    warn!(error = %e, "save unreadable, starting a new game");
                    messages.push(format!("Save unreadable ({e}), new game started"));
                    GameSnapshot::new_game(&data)?
                }
            },
            Err(_) => GameSnapshot::new_game(&data)?,
        };
        info!(seed, depth = snapshot.depth, "game ready");

        Ok(GameState {
            data: Arc::new(data),
            snapshot,
            battle: None,
            screen: Screen::Camp,
            messages,
            selected_ability: 0,
            selected_potion: 0,
            member_index: 0,
            slot_index: 0,
            bag_index: 0,
            equip_focus: EquipFocus::Slots,
            rng: ChaCha8Rng::seed_from_u64(seed),
            save_path,
        })
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    // -- Camp ---------------------------------------------------------------

    pub fn start_battle(&mut self) {
        let rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let mut battle = match self.snapshot.start_battle(Arc::clone(&self.data), rng) {
            Ok(battle) => battle,
            Err(e) => {
                self.push_message(e.to_string());
                return;
            }
        };
        if let Err(e) = battle.start() {
            self.push_message(e.to_string());
        }
        self.selected_ability = 0;
        self.selected_potion = 0;
        self.battle = Some(battle);
        self.screen = Screen::Battle;
    }

    pub fn descend(&mut self) {
        self.snapshot.depth += 1;
        let depth = self.snapshot.depth;
        self.push_message(format!("You descend to floor {depth}."));
    }

    pub fn ascend(&mut self) {
        if self.snapshot.depth > 1 {
            self.snapshot.depth -= 1;
            let depth = self.snapshot.depth;
            self.push_message(format!("You climb to floor {depth}."));
        }
    }

    /// Rest at camp: full HP and MP for the living
    pub fn rest(&mut self) {
        for member in &mut self.snapshot.party {
            if member.is_alive() {
                let stats = effective_stats(member, &self.data.sets);
                member.hp = stats.max_hp;
                member.mp = stats.max_mp;
            }
        }
        self.push_message("The party rests.");
    }

    pub fn save(&mut self) {
        let result = self
            .snapshot
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&self.save_path, json).map_err(|e| e.to_string()));
        match result {
            Ok(()) => {
                let path = self.save_path.display().to_string();
                self.push_message(format!("Saved to {path}"));
            }
            Err(e) => self.push_message(format!("Save failed: {e}")),
        }
    }

    // -- Battle -------------------------------------------------------------

    /// Abilities of the member whose turn it is
    pub fn current_abilities(&self) -> Vec<&Ability> {
        let Some(battle) = &self.battle else {
            return Vec::new();
        };
        match battle.current_actor() {
            Some(actor) => self.data.abilities.for_job(battle.party()[actor].job),
            None => Vec::new(),
        }
    }

    pub fn next_ability(&mut self, step: isize) {
        let count = self.current_abilities().len();
        if count > 0 {
            self.selected_ability = wrap(self.selected_ability, step, count);
        }
    }

    pub fn next_target(&mut self, step: isize) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        let count = battle.monsters().len();
        if count == 0 {
            return;
        }
        // Skip the dead
        let mut index = battle.target();
        for _ in 0..count {
            index = wrap(index, step, count);
            if battle.monsters()[index].is_alive() {
                break;
            }
        }
        let _ = battle.select_target(index);
    }

    pub fn next_potion(&mut self) {
        let count = self.battle.as_ref().map_or(0, |b| b.potions().len());
        if count > 0 {
            self.selected_potion = (self.selected_potion + 1) % count;
        }
    }

    pub fn use_selected_ability(&mut self) {
        let Some(id) = self
            .current_abilities()
            .get(self.selected_ability)
            .map(|a| a.id.clone())
        else {
            return;
        };
        if let Some(battle) = &mut self.battle {
            // Rejections are already in the battle log
            if battle.use_ability(&id, None).is_ok() {
                self.selected_ability = 0;
            }
        }
    }

    /// The current actor drinks the selected potion
    pub fn use_selected_potion(&mut self) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        let Some(actor) = battle.current_actor() else {
            return;
        };
        if battle.use_potion(self.selected_potion, actor).is_ok() {
            self.selected_potion = 0;
        }
    }

    pub fn flee(&mut self) {
        if let Some(battle) = &mut self.battle {
            let _ = battle.flee();
        }
    }

    /// Space on the battle screen: let the monsters act, or leave a finished battle
    pub fn advance_battle(&mut self) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        match battle.phase() {
            BattlePhase::MonsterTurn => {
                let _ = battle.run_monster_turn();
            }
            phase if phase.is_over() => self.close_battle(),
            _ => {}
        }
    }

    fn close_battle(&mut self) {
        let Some(battle) = self.battle.take() else {
            return;
        };
        let outcome: BattleOutcome = battle.finish();
        let result = self.snapshot.finish_battle(outcome);
        self.push_message(result.summary());

        if result == BattleResult::Defeat {
            match GameSnapshot::new_game(&self.data) {
                Ok(snapshot) => {
                    self.snapshot = snapshot;
                    self.push_message("A new party sets out from floor 1.");
                }
                Err(e) => self.push_message(e.to_string()),
            }
        }
        self.screen = Screen::Camp;
    }

    // -- Equipment ----------------------------------------------------------

    pub fn open_equipment(&mut self) {
        self.screen = Screen::Equipment;
        self.slot_index = 0;
        self.bag_index = 0;
        self.equip_focus = EquipFocus::Slots;
    }

    /// Slots the selected member's job may use
    pub fn member_slots(&self) -> Vec<EquipSlot> {
        self.snapshot
            .party
            .get(self.member_index)
            .map(|m| slot_rules::usable_slots(m.job))
            .unwrap_or_default()
    }

    pub fn next_member(&mut self) {
        let count = self.snapshot.party.len();
        if count > 0 {
            self.member_index = (self.member_index + 1) % count;
            self.slot_index = 0;
        }
    }

    pub fn move_cursor(&mut self, step: isize) {
        match self.equip_focus {
            EquipFocus::Slots => {
                let count = self.member_slots().len();
                if count > 0 {
                    self.slot_index = wrap(self.slot_index, step, count);
                }
            }
            EquipFocus::Bag => {
                let count = self.snapshot.bag.len();
                if count > 0 {
                    self.bag_index = wrap(self.bag_index, step, count);
                }
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.equip_focus = match self.equip_focus {
            EquipFocus::Slots => EquipFocus::Bag,
            EquipFocus::Bag => EquipFocus::Slots,
        };
    }

    /// Put the selected bag item into the selected slot
    pub fn equip_selected(&mut self) {
        let Some(slot) = self.member_slots().get(self.slot_index).copied() else {
            return;
        };
        let Some(id) = self.snapshot.bag.get(self.bag_index).map(|i| i.instance_id) else {
            self.push_message("The bag is empty.");
            return;
        };
        match self.snapshot.equip(self.member_index, slot, id, &self.data.sets) {
            Ok(()) => {
                self.bag_index = self.bag_index.min(self.snapshot.bag.len().saturating_sub(1));
                self.push_message(format!("Equipped {id} in {}.", slot.label()));
            }
            Err(e) => self.push_message(e.to_string()),
        }
    }

    pub fn unequip_selected(&mut self) {
        let Some(slot) = self.member_slots().get(self.slot_index).copied() else {
            return;
        };
        match self.snapshot.unequip(self.member_index, slot, &self.data.sets) {
            Ok(id) => self.push_message(format!("Moved {id} to the bag.")),
            Err(e) => self.push_message(e.to_string()),
        }
    }
}

fn wrap(index: usize, step: isize, count: usize) -> usize {
    let count = count as isize;
    ((index as isize + step).rem_euclid(count)) as usize
}
