//! Per-combatant status record

use serde::{Deserialize, Serialize};

/// Forced targeting on a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taunt {
    /// Party index the monster must attack
    pub taunter: usize,
    /// Monster turns left
    pub turns_left: u32,
    /// Flat attack reduction while taunted
    pub attack_reduction: i32,
}

/// Effects one combatant carries. Every field is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Damage taken at the start of each of the owner's turns
    pub burn: Option<i32>,
    /// Speed reduction percent
    pub slow: Option<i32>,
    /// Skip the owner's next turn
    pub frozen: bool,
    pub taunt: Option<Taunt>,
    /// Percent chance to dodge any monster attack, for the rest of the battle
    pub stealth: Option<i32>,
}

impl StatusRecord {
    pub fn is_empty(&self) -> bool {
        *self == StatusRecord::default()
    }

    /// Short labels for display ("Burn 5", "Frozen", ...)
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if let Some(burn) = self.burn {
            labels.push(format!("Burn {burn}"));
        }
        if let Some(slow) = self.slow {
            labels.push(format!("Slow {slow}%"));
        }
        if self.frozen {
            labels.push("Frozen".to_string());
        }
        if let Some(taunt) = self.taunt {
            labels.push(format!("Taunted ({})", taunt.turns_left));
        }
        if let Some(stealth) = self.stealth {
            labels.push(format!("Stealth {stealth}%"));
        }
        labels
    }
}

/// An effect to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEffect {
    Burn { damage: i32 },
    Slow { percent: i32 },
    Freeze,
    Taunt { taunter: usize, turns: u32, attack_reduction: i32 },
    Stealth { dodge: i32 },
}

/// What happened when a combatant's turn started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Burn damage to deal before the combatant acts
    pub burn_damage: i32,
    /// The combatant was frozen; its turn is lost and the freeze is spent
    pub skip_turn: bool,
}
