//! Activity record generator

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::vocab::{ColorTag, ACTIONS, NAME_PREFIXES, NAME_SUFFIXES, PRIZES};

/// One synthetic feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Synthetic username (prefix + suffix + 2-digit number)
    pub user: String,
    /// Action verb
    pub action: String,
    /// Prize caption
    pub prize: String,
    /// Display color for the prize
    pub color: ColorTag,
}

/// Feed record generator with optional seed
pub struct ActivityGenerator {
    rng: ChaCha8Rng,
}

impl ActivityGenerator {
    /// Create a new generator with optional seed
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    /// Generate a fresh record from the fixed vocabularies
    pub fn generate(&mut self) -> ActivityRecord {
        let prefix = NAME_PREFIXES[self.rng.random_range(0..NAME_PREFIXES.len())];
        let suffix = NAME_SUFFIXES[self.rng.random_range(0..NAME_SUFFIXES.len())];
        let num = self.rng.random_range(0..99u32);
        let (prize, color) = PRIZES[self.rng.random_range(0..PRIZES.len())];
        let action = ACTIONS[self.rng.random_range(0..ACTIONS.len())];

        ActivityRecord {
            user: format!("{}{}{}", prefix, suffix, num),
            action: action.to_string(),
            prize: prize.to_string(),
            color,
        }
    }
}
