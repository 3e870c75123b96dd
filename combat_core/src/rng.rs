//! Randomness source for combat, spawning and loot
//!
//! Every random decision in the engine draws from a [`CombatRng`] passed in
//! by the caller. Any `rand` generator works; [`ScriptedRng`] replays a
//! fixed sequence of draws for tests and replays.

use rand::{Rng, RngCore};

/// Uniform draws in `[0, 1)`
pub trait CombatRng {
    fn next_f64(&mut self) -> f64;

    /// Succeeds with probability `probability` (0.0 - 1.0)
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Percent roll. A zero or negative chance never draws.
    fn roll_percent(&mut self, percent: i32) -> bool {
        if percent <= 0 {
            return false;
        }
        self.next_f64() * 100.0 < f64::from(percent)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: RngCore> CombatRng for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Implements [`RngCore`] so that `rand`'s `f64` sampling yields exactly the
/// scripted values (to 53 bits).
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedRng {
    /// `draws` must be non-empty; each value is clamped into `[0, 1)`
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let mut draws: Vec<f64> = draws.into();
        if draws.is_empty() {
            draws.push(0.0);
        }
        ScriptedRng { draws, position: 0 }
    }

    /// Draws consumed so far
    pub fn consumed(&self) -> usize {
        self.position
    }

    fn next_draw(&mut self) -> f64 {
        let value = self.draws[self.position % self.draws.len()];
        self.position += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        // rand maps the top 53 bits of a u64 onto [0, 1)
        let mantissa = (self.next_draw() * (1u64 << 53) as f64) as u64;
        mantissa << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
