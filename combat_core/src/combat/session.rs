//! CombatSession - Drives one battle from spawn to its end

use super::monster_turn::MonsterBlock;
use super::{ActionError, BattlePhase, BattleResult, BattleView, CombatEvent, DamageKind, HealKind};
use super::{MemberView, MonsterView, Rewards};
use crate::ability::{AbilityResolver, Battlefield};
use crate::character::Character;
use crate::config::GameData;
use crate::encounter::spawn_encounter;
use crate::item::{InstanceIdGenerator, Potion};
use crate::loot::roll_loot;
use crate::monster::Monster;
use crate::progression::award_xp;
use crate::rng::CombatRng;
use crate::stat_block::effective_stats;
use crate::status::StatusEffectTracker;
use crate::turn::TurnOrder;
use crate::types::CombatantId;
use std::sync::Arc;
use tracing::{debug, info};

/// What a finished session hands back to the game
#[derive(Debug, Clone, PartialEq)]
pub struct BattleOutcome {
    pub party: Vec<Character>,
    /// Potions left after the battle (drops are in the rewards)
    pub potions: Vec<Potion>,
    pub result: BattleResult,
    /// Next free item instance id
    pub next_instance_id: u64,
}

/// One battle. Owns the party, the monsters and the status tracker until
/// [`CombatSession::finish`] returns them.
pub struct CombatSession<R: CombatRng> {
    data: Arc<GameData>,
    party: Vec<Character>,
    potions: Vec<Potion>,
    monsters: Vec<Monster>,
    statuses: StatusEffectTracker,
    order: TurnOrder,
    phase: BattlePhase,
    target: usize,
    defending: bool,
    round: u32,
    depth: u32,
    log: Vec<String>,
    pending: Vec<CombatEvent>,
    rng: R,
    ids: InstanceIdGenerator,
    result: Option<BattleResult>,
}

impl<R: CombatRng> CombatSession<R> {
    /// A session in the `Idle` phase. Call [`start`](Self::start) or
    /// [`start_with`](Self::start_with) to bring in monsters.
    pub fn new(data: Arc<GameData>, party: Vec<Character>, potions: Vec<Potion>, depth: u32, rng: R) -> Self {
        CombatSession {
            data,
            party,
            potions,
            monsters: Vec::new(),
            statuses: StatusEffectTracker::new(),
            order: TurnOrder::default(),
            phase: BattlePhase::Idle,
            target: 0,
            defending: false,
            round: 0,
            depth,
            log: Vec::new(),
            pending: Vec::new(),
            rng,
            ids: InstanceIdGenerator::default(),
            result: None,
        }
    }

    /// Issue dropped item ids from `ids` instead of starting at 1
    pub fn with_instance_ids(mut self, ids: InstanceIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Spawn a random encounter for the session's depth and begin round 1
    pub fn start(&mut self) -> Result<(), ActionError> {
        if self.phase != BattlePhase::Idle {
            return Err(self.reject(ActionError::NotAcceptingInput(self.phase)));
        }
        let monsters = spawn_encounter(
            &self.data.monsters,
            self.depth,
            &self.data.constants.encounter,
            &mut self.rng,
        );
        self.start_with(monsters)
    }

    /// Begin round 1 against the given monsters
    pub fn start_with(&mut self, monsters: Vec<Monster>) -> Result<(), ActionError> {
        if self.phase != BattlePhase::Idle {
            return Err(self.reject(ActionError::NotAcceptingInput(self.phase)));
        }
        info!(depth = self.depth, monsters = monsters.len(), "battle started");
        self.monsters = monsters;
        self.target = 0;
        self.record(vec![CombatEvent::BattleStarted {
            monsters: self.monsters.len(),
        }]);

        if self.all_monsters_defeated() {
            self.victory();
        } else {
            self.retarget();
            self.begin_round();
        }
        Ok(())
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn party(&self) -> &[Character] {
        &self.party
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub fn statuses(&self) -> &StatusEffectTracker {
        &self.statuses
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.order
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Set once the battle has ended
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// Party member whose action is awaited, during `PartyTurn` only
    pub fn current_actor(&self) -> Option<usize> {
        if self.phase == BattlePhase::PartyTurn {
            self.order.current()
        } else {
            None
        }
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Choose the default monster target
    pub fn select_target(&mut self, index: usize) -> Result<(), ActionError> {
        if self.phase != BattlePhase::PartyTurn {
            return Err(self.reject(ActionError::NotAcceptingInput(self.phase)));
        }
        let id = CombatantId::Monster(index);
        match self.monsters.get(index).map(Monster::is_alive) {
            None => Err(self.reject(ActionError::InvalidTarget(id))),
            Some(false) => Err(self.reject(ActionError::DeadTarget(id))),
            Some(true) => {
                if self.target != index {
                    self.target = index;
                    self.record(vec![CombatEvent::TargetChanged { index }]);
                }
                Ok(())
            }
        }
    }

    /// If the selected target is dead, move to the first living monster.
    /// Returns the target afterwards, or `None` when every monster is dead.
    pub fn retarget(&mut self) -> Option<usize> {
        if self.monsters.get(self.target).is_some_and(Monster::is_alive) {
            return Some(self.target);
        }
        let index = self.monsters.iter().position(Monster::is_alive)?;
        self.target = index;
        self.record(vec![CombatEvent::TargetChanged { index }]);
        Some(index)
    }

    /// The current actor uses an ability. Monster-targeting abilities use
    /// `target` when given, else the selected target.
    ///
    /// On error nothing changes and the actor keeps the turn.
    pub fn use_ability(&mut self, ability_id: &str, target: Option<usize>) -> Result<(), ActionError> {
        let actor = self.party_turn_actor()?;
        let data = Arc::clone(&self.data);
        let Some(ability) = data.abilities.get(ability_id) else {
            return Err(self.reject(ActionError::UnknownAbility(ability_id.to_string())));
        };
        let target = ability.targets_monster().then(|| target.unwrap_or(self.target));

        let resolver = AbilityResolver::new(&data.sets, &data.constants.combat);
        let mut field = Battlefield {
            party: &mut self.party,
            monsters: &mut self.monsters,
            statuses: &mut self.statuses,
            defending: &mut self.defending,
        };
        match resolver.resolve(&mut field, actor, ability, target, &mut self.rng) {
            Ok(events) => {
                if let Some(index) = target {
                    self.target = index;
                }
                self.record(events);
                self.end_party_action();
                Ok(())
            }
            Err(error) => Err(self.reject(error)),
        }
    }

    /// The current actor gives potion `potion` (bag position) to party
    /// member `member`. Consumes the potion and the actor's turn.
    pub fn use_potion(&mut self, potion: usize, member: usize) -> Result<(), ActionError> {
        let actor = self.party_turn_actor()?;
        if potion >= self.potions.len() {
            return Err(self.reject(ActionError::NoSuchPotion(potion)));
        }
        let member_id = CombatantId::Party(member);
        match self.party.get(member).map(Character::is_alive) {
            None => return Err(self.reject(ActionError::InvalidTarget(member_id))),
            Some(false) => return Err(self.reject(ActionError::DeadTarget(member_id))),
            Some(true) => {}
        }

        let potion = self.potions.remove(potion);
        let stats = effective_stats(&self.party[member], &self.data.sets);
        let character = &mut self.party[member];
        let healed = character.restore_hp(potion.hp, stats.max_hp);
        let restored = character.restore_mp(potion.mp, stats.max_mp);

        let mut events = vec![CombatEvent::PotionUsed {
            actor: CombatantId::Party(actor),
            target: member_id,
            potion: potion.name.clone(),
        }];
        if potion.hp > 0 {
            events.push(CombatEvent::Healed {
                target: member_id,
                amount: healed,
                kind: HealKind::Potion,
            });
        }
        if potion.mp > 0 {
            events.push(CombatEvent::ManaRestored {
                target: member_id,
                amount: restored,
            });
        }
        self.record(events);
        self.end_party_action();
        Ok(())
    }

    /// Resolve the monster block, then start the next round or end the battle
    pub fn run_monster_turn(&mut self) -> Result<(), ActionError> {
        if self.phase != BattlePhase::MonsterTurn {
            return Err(self.reject(ActionError::NotAcceptingInput(self.phase)));
        }
        if self.all_party_defeated() {
            self.defeat();
            return Ok(());
        }

        let data = Arc::clone(&self.data);
        let order = self.order.monster_order().to_vec();
        let events = MonsterBlock {
            party: &mut self.party,
            monsters: &mut self.monsters,
            statuses: &mut self.statuses,
            defending: self.defending,
            sets: &data.sets,
            constants: &data.constants.combat,
        }
        .run(&order, &mut self.rng);
        self.record(events);
        self.defending = false;

        if self.all_monsters_defeated() {
            self.victory();
        } else if self.all_party_defeated() {
            self.defeat();
        } else {
            self.retarget();
            self.begin_round();
        }
        Ok(())
    }

    /// Leave the battle. No rewards; the party keeps its current state.
    pub fn flee(&mut self) -> Result<(), ActionError> {
        if !self.phase.is_active() {
            return Err(self.reject(ActionError::NotAcceptingInput(self.phase)));
        }
        self.phase = BattlePhase::Fled;
        self.end(BattleResult::Fled);
        Ok(())
    }

    pub fn view(&self) -> BattleView {
        let sets = &self.data.sets;
        let labels = |id: CombatantId| self.statuses.query(id).map(|r| r.labels()).unwrap_or_default();
        BattleView {
            phase: self.phase,
            round: self.round,
            monsters: self
                .monsters
                .iter()
                .enumerate()
                .map(|(i, m)| MonsterView {
                    name: m.name.clone(),
                    hp: m.hp,
                    max_hp: m.max_hp,
                    alive: m.is_alive(),
                    statuses: labels(CombatantId::Monster(i)),
                })
                .collect(),
            party: self
                .party
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let stats = effective_stats(c, sets);
                    MemberView {
                        name: c.name.clone(),
                        job: c.job,
                        level: c.level,
                        hp: c.hp,
                        max_hp: stats.max_hp,
                        mp: c.mp,
                        max_mp: stats.max_mp,
                        alive: c.is_alive(),
                        statuses: labels(CombatantId::Party(i)),
                    }
                })
                .collect(),
            current_actor: self.current_actor(),
            target: self.target,
            defending: self.defending,
            log: self.log.clone(),
        }
    }

    /// End the session and hand the party back. A battle still in progress
    /// counts as fled.
    pub fn finish(self) -> BattleOutcome {
        BattleOutcome {
            party: self.party,
            potions: self.potions,
            result: self.result.unwrap_or(BattleResult::Fled),
            next_instance_id: self.ids.peek(),
        }
    }

    fn party_turn_actor(&mut self) -> Result<usize, ActionError> {
        match (self.phase, self.order.current()) {
            (BattlePhase::PartyTurn, Some(actor)) => Ok(actor),
            (phase, _) => Err(self.reject(ActionError::NotAcceptingInput(phase))),
        }
    }

    fn begin_round(&mut self) {
        if self.all_party_defeated() {
            self.defeat();
            return;
        }
        self.round += 1;
        self.record(vec![CombatEvent::RoundStarted { round: self.round }]);
        self.order = TurnOrder::build(&self.party, &self.monsters, &self.data.sets, &self.statuses);
        self.phase = BattlePhase::PartyTurn;
        self.settle_party_turn();
    }

    /// Move past the finished action and find the next member able to act
    fn end_party_action(&mut self) {
        if self.all_monsters_defeated() {
            self.victory();
            return;
        }
        self.retarget();
        self.order.advance();
        self.settle_party_turn();
    }

    /// Start-of-turn ticks for the current party member. Members killed by
    /// burn or frozen in place are passed over; when the party block is
    /// exhausted the monsters are up.
    fn settle_party_turn(&mut self) {
        while let Some(actor) = self.order.current() {
            let id = CombatantId::Party(actor);
            if !self.party[actor].is_alive() {
                self.order.advance();
                continue;
            }

            let tick = self.statuses.tick(id);
            let mut events = Vec::new();
            if tick.burn_damage > 0 {
                let amount = self.party[actor].take_damage(tick.burn_damage);
                events.push(CombatEvent::Damage {
                    source: None,
                    target: id,
                    amount,
                    critical: false,
                    kind: DamageKind::Burn,
                });
            }
            let alive = self.party[actor].is_alive();
            if !alive {
                self.statuses.clear(id);
                self.statuses.clear_taunts_by(actor);
                events.push(CombatEvent::Defeated { target: id });
            } else if tick.skip_turn {
                events.push(CombatEvent::TurnSkipped { actor: id });
            }
            self.record(events);

            if alive && !tick.skip_turn {
                return;
            }
            self.order.advance();
        }

        if self.all_party_defeated() {
            self.defeat();
        } else {
            self.phase = BattlePhase::MonsterTurn;
        }
    }

    fn victory(&mut self) {
        let xp: u32 = self.monsters.iter().map(|m| m.xp).sum();
        let gold: u32 = self.monsters.iter().map(|m| m.gold).sum();
        let data = Arc::clone(&self.data);
        let loot = roll_loot(&self.monsters, self.depth, &data, &mut self.ids, &mut self.rng);
        let level_ups = award_xp(&mut self.party, xp, &data.constants.progression, &data.sets);

        let mut events = Vec::new();
        events.extend(loot.equipment.iter().map(|item| CombatEvent::ItemFound {
            item: item.display_name(),
        }));
        events.extend(loot.potions.iter().map(|potion| CombatEvent::PotionFound {
            potion: potion.name.clone(),
        }));
        events.extend(level_ups.iter().map(|up| CombatEvent::LevelUp {
            member: up.member,
            level: up.level,
        }));
        self.record(events);

        self.phase = BattlePhase::Victory;
        self.end(BattleResult::Victory(Rewards {
            xp,
            gold,
            equipment: loot.equipment,
            potions: loot.potions,
            level_ups,
        }));
    }

    fn defeat(&mut self) {
        self.phase = BattlePhase::Defeat;
        self.end(BattleResult::Defeat);
    }

    fn end(&mut self, result: BattleResult) {
        info!(round = self.round, outcome = %result.summary(), "battle ended");
        self.statuses = StatusEffectTracker::new();
        self.defending = false;
        self.record(vec![CombatEvent::BattleEnded { result: result.clone() }]);
        self.result = Some(result);
    }

    fn all_monsters_defeated(&self) -> bool {
        !self.monsters.iter().any(Monster::is_alive)
    }

    fn all_party_defeated(&self) -> bool {
        !self.party.iter().any(Character::is_alive)
    }

    /// Surface a rejected action in the log
    fn reject(&mut self, error: ActionError) -> ActionError {
        debug!(%error, "action rejected");
        self.log.push(error.to_string());
        error
    }

    fn record(&mut self, events: Vec<CombatEvent>) {
        for event in events {
            let line = event.describe(&|id| self.name_of(id));
            self.log.push(line);
            self.pending.push(event);
        }
    }

    fn name_of(&self, id: CombatantId) -> String {
        let name = match id {
            CombatantId::Party(i) => self.party.get(i).map(|c| c.name.as_str()),
            CombatantId::Monster(i) => self.monsters.get(i).map(|m| m.name.as_str()),
        };
        name.unwrap_or("someone").to_string()
    }
}
