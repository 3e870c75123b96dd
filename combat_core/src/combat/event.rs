//! Combat events - everything observable that happens in a battle
//!
//! Every state change the engine makes emits an event. Each event renders to
//! one log line; UIs may also react to them directly (animations, sounds).

use super::BattleResult;
use crate::status::StatusEffect;
use crate::types::CombatantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Party ability hit
    Hit,
    /// Splash from a chain-damage hit
    Chain,
    /// Start-of-turn burn
    Burn,
    /// Party member striking back
    Counter,
    /// Monster attack on the party
    MonsterAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealKind {
    Ability,
    Lifesteal,
    Potion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DodgeKind {
    Stealth,
    Evasion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    BattleStarted {
        monsters: usize,
    },
    RoundStarted {
        round: u32,
    },
    AbilityUsed {
        actor: CombatantId,
        ability: String,
        mp_cost: i32,
    },
    PotionUsed {
        actor: CombatantId,
        target: CombatantId,
        potion: String,
    },
    Damage {
        source: Option<CombatantId>,
        target: CombatantId,
        amount: i32,
        critical: bool,
        kind: DamageKind,
    },
    Healed {
        target: CombatantId,
        amount: i32,
        kind: HealKind,
    },
    ManaRestored {
        target: CombatantId,
        amount: i32,
    },
    StatusApplied {
        target: CombatantId,
        effect: StatusEffect,
    },
    TurnSkipped {
        actor: CombatantId,
    },
    Dodged {
        attacker: CombatantId,
        target: CombatantId,
        kind: DodgeKind,
    },
    Defending {
        actor: CombatantId,
    },
    Defeated {
        target: CombatantId,
    },
    TargetChanged {
        index: usize,
    },
    ItemFound {
        item: String,
    },
    PotionFound {
        potion: String,
    },
    LevelUp {
        member: usize,
        level: u32,
    },
    BattleEnded {
        result: BattleResult,
    },
}

impl CombatEvent {
    /// Render as a log line. `name` resolves combatant ids to display names.
    pub fn describe(&self, name: &dyn Fn(CombatantId) -> String) -> String {
        match self {
            CombatEvent::BattleStarted { monsters } => {
                if *monsters == 1 {
                    "A monster appears!".to_string()
                } else {
                    format!("{monsters} monsters appear!")
                }
            }
            CombatEvent::RoundStarted { round } => format!("Round {round}"),
            CombatEvent::AbilityUsed { actor, ability, .. } => {
                format!("{} uses {}!", name(*actor), ability)
            }
            CombatEvent::PotionUsed { actor, target, potion } => {
                if actor == target {
                    format!("{} drinks a {}!", name(*actor), potion)
                } else {
                    format!("{} gives {} a {}!", name(*actor), name(*target), potion)
                }
            }
            CombatEvent::Damage {
                source,
                target,
                amount,
                critical,
                kind,
            } => {
                let source = source.map(|s| name(s)).unwrap_or_default();
                let target = name(*target);
                match kind {
                    DamageKind::Hit if *critical => {
                        format!("Critical hit! {source} deals {amount} damage to {target}!")
                    }
                    DamageKind::Hit => format!("{source} deals {amount} damage to {target}!"),
                    DamageKind::Chain => format!("Chain damage hits {target} for {amount}!"),
                    DamageKind::Burn => format!("{target} takes {amount} burn damage!"),
                    DamageKind::Counter => format!("{source} counters {target} for {amount} damage!"),
                    DamageKind::MonsterAttack => {
                        format!("{source} attacks {target} for {amount} damage!")
                    }
                }
            }
            CombatEvent::Healed { target, amount, kind } => match kind {
                HealKind::Lifesteal => format!("{} drains {} HP!", name(*target), amount),
                HealKind::Ability | HealKind::Potion => {
                    format!("{} recovers {} HP!", name(*target), amount)
                }
            },
            CombatEvent::ManaRestored { target, amount } => {
                format!("{} recovers {} MP!", name(*target), amount)
            }
            CombatEvent::StatusApplied { target, effect } => {
                let target = name(*target);
                match effect {
                    StatusEffect::Burn { damage } => {
                        format!("{target} is burning ({damage} per turn)!")
                    }
                    StatusEffect::Slow { percent } => format!("{target} is slowed by {percent}%!"),
                    StatusEffect::Freeze => format!("{target} is frozen solid!"),
                    StatusEffect::Taunt {
                        taunter,
                        turns,
                        attack_reduction,
                    } => format!(
                        "{target} is provoked by {} for {turns} turns (-{attack_reduction} attack)!",
                        name(CombatantId::Party(*taunter))
                    ),
                    StatusEffect::Stealth { dodge } => {
                        format!("{target} fades into the shadows ({dodge}% dodge)!")
                    }
                }
            }
            CombatEvent::TurnSkipped { actor } => format!("{} is frozen and can't act!", name(*actor)),
            CombatEvent::Dodged {
                attacker,
                target,
                kind,
            } => match kind {
                DodgeKind::Stealth => {
                    format!("{} slips away from {}'s attack!", name(*target), name(*attacker))
                }
                DodgeKind::Evasion => {
                    format!("{} evades {}'s attack!", name(*target), name(*attacker))
                }
            },
            CombatEvent::Defending { actor } => {
                format!("{} takes a defensive stance! The party's defense is doubled.", name(*actor))
            }
            CombatEvent::Defeated { target } => {
                if target.is_party() {
                    format!("{} has fallen!", name(*target))
                } else {
                    format!("Defeated {}!", name(*target))
                }
            }
            CombatEvent::TargetChanged { index } => {
                format!("Now targeting {}.", name(CombatantId::Monster(*index)))
            }
            CombatEvent::ItemFound { item } => format!("Found {item}!"),
            CombatEvent::PotionFound { potion } => format!("Found {potion}!"),
            CombatEvent::LevelUp { member, level } => {
                format!("{} reached level {}!", name(CombatantId::Party(*member)), level)
            }
            CombatEvent::BattleEnded { result } => result.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(id: CombatantId) -> String {
        match id {
            CombatantId::Party(0) => "Bork".to_string(),
            CombatantId::Party(_) => "Pyra".to_string(),
            CombatantId::Monster(_) => "Cave Bat".to_string(),
        }
    }

    #[test]
    fn test_damage_lines() {
        let hit = CombatEvent::Damage {
            source: Some(CombatantId::Party(0)),
            target: CombatantId::Monster(0),
            amount: 15,
            critical: false,
            kind: DamageKind::Hit,
        };
        assert_eq!(hit.describe(&names), "Bork deals 15 damage to Cave Bat!");

        let chain = CombatEvent::Damage {
            source: Some(CombatantId::Party(0)),
            target: CombatantId::Monster(1),
            amount: 25,
            critical: false,
            kind: DamageKind::Chain,
        };
        assert_eq!(chain.describe(&names), "Chain damage hits Cave Bat for 25!");
    }

    #[test]
    fn test_defeated_lines_by_side() {
        let monster = CombatEvent::Defeated {
            target: CombatantId::Monster(0),
        };
        let member = CombatEvent::Defeated {
            target: CombatantId::Party(0),
        };
        assert_eq!(monster.describe(&names), "Defeated Cave Bat!");
        assert_eq!(member.describe(&names), "Bork has fallen!");
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = CombatEvent::TurnSkipped {
            actor: CombatantId::Monster(2),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "turn_skipped");
        assert_eq!(json["actor"]["side"], "monster");
        assert_eq!(json["actor"]["index"], 2);
    }
}
