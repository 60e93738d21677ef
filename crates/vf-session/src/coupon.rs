//! Coupon validation rules and state
//!
//! Pure rules live here; the debounce scheduling (800ms, last edit wins)
//! is orchestrated by the controller with generation-tagged tasks.

use serde::{Deserialize, Serialize};

/// Prefixes that pass validation
pub const ACCEPTED_PREFIXES: [&str; 7] =
    ["WELCOME", "BONUS", "GAME", "VIP", "KIRIN", "VAULT", "TEST"];

/// Normalized length bounds (inclusive)
pub const MIN_LEN: usize = 4;
pub const MAX_LEN: usize = 15;

/// Feedback shown for a valid code
pub const FEEDBACK_VALID: &str = "PROMO ACTIVE: EXTRA REWARDS UNLOCKED";
/// Feedback shown for an invalid code
pub const FEEDBACK_INVALID: &str = "ERROR: CODE NOT RECOGNIZED";

/// Resolution state of the coupon field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponStatus {
    /// Field empty, nothing pending
    #[default]
    Idle,
    /// Edit seen, resolution scheduled
    Checking,
    Valid,
    Invalid,
}

/// Observable coupon state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponState {
    pub status: CouponStatus,
    /// Feedback line, empty while idle/checking
    pub feedback: String,
    /// Normalized code text
    pub code: String,
}

/// Normalize raw input: uppercase, alphanumerics only
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validation rule over a normalized code
pub fn is_valid(code: &str) -> bool {
    let len_ok = (MIN_LEN..=MAX_LEN).contains(&code.len());
    let prefix_ok = ACCEPTED_PREFIXES.iter().any(|p| code.starts_with(p));
    len_ok && prefix_ok
}
