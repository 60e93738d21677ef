//! Ambient market state
//!
//! Background scarcity numbers: remaining slots, players online, bonus
//! pool, and the rotating top ticker. Pure state transitions over an
//! injected RNG; the controller owns the two intervals that call them.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use vf_feed::{ActivityGenerator, ActivityRecord};

/// Slots never drop below this
pub const MIN_SLOTS: u32 = 2;
/// Bonus pool bounds (inclusive)
pub const BONUS_MIN: u32 = 5;
pub const BONUS_MAX: u32 = 170;
/// Players-online starting point
pub const PLAYERS_BASELINE: i64 = 1429;

/// Observable ambient state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketState {
    /// Remaining claim slots; only ever decreases, floored at [`MIN_SLOTS`]
    pub slots_left: u32,
    /// Drifting online count
    pub players_online: i64,
    /// Bonus pool, clamped to [`BONUS_MIN`]..=[`BONUS_MAX`]
    pub bonus_count: u32,
    /// Current top ticker record
    pub top_ticker: ActivityRecord,
    /// Whether the ticker is visible (hidden briefly mid-rotation)
    pub ticker_visible: bool,
}

impl MarketState {
    /// Random initial state
    pub fn new(rng: &mut ChaCha8Rng, feed: &mut ActivityGenerator) -> Self {
        Self {
            slots_left: rng.random_range(3..=17),
            players_online: PLAYERS_BASELINE,
            bonus_count: rng.random_range(BONUS_MIN..=BONUS_MAX),
            top_ticker: feed.generate(),
            ticker_visible: true,
        }
    }

    /// One market interval: scarcity decay plus player drift
    pub fn drift(&mut self, rng: &mut ChaCha8Rng) {
        if rng.random_bool(0.2) {
            self.slots_left = self.slots_left.saturating_sub(1).max(MIN_SLOTS);
        }
        let delta: i64 = if rng.random_bool(0.5) {
            rng.random_range(0..5)
        } else {
            -rng.random_range(0..3)
        };
        self.players_online += delta;
    }

    /// Start a ticker rotation: hide the capsule
    pub fn begin_rotation(&mut self) {
        self.ticker_visible = false;
    }

    /// Finish a rotation: fresh record, reveal, perturb bonus pool
    pub fn complete_rotation(&mut self, rng: &mut ChaCha8Rng, feed: &mut ActivityGenerator) {
        self.top_ticker = feed.generate();
        self.ticker_visible = true;

        let volatility: i64 = rng.random_range(-2..=2);
        let next = self.bonus_count as i64 + volatility;
        self.bonus_count = next.clamp(BONUS_MIN as i64, BONUS_MAX as i64) as u32;
    }
}
