//! Stage — the session phase enum
//!
//! A session walks the strict path idle → processing → locked → verified
//! and never returns to idle. `verified` is terminal; re-submitting from
//! it only re-emits the completion hand-off.

use serde::{Deserialize, Serialize};

/// Current phase of a claim session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for a submission
    #[default]
    Idle,
    /// The 10-step sequence is running
    Processing,
    /// Sequence done, waiting on the human-verification gate
    Locked,
    /// Verification acknowledged; completion hand-off pending or done
    Verified,
}

impl Stage {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Processing => "processing",
            Stage::Locked => "locked",
            Stage::Verified => "verified",
        }
    }

    /// Whether a form submission is accepted in this stage
    #[inline]
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Stage::Idle | Stage::Verified)
    }

    /// Whether the explicit verify action is accepted in this stage
    #[inline]
    pub fn accepts_verify(&self) -> bool {
        matches!(self, Stage::Locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_gating() {
        assert!(Stage::Idle.accepts_submit());
        assert!(Stage::Verified.accepts_submit());
        assert!(!Stage::Processing.accepts_submit());
        assert!(!Stage::Locked.accepts_submit());
    }

    #[test]
    fn test_verify_only_from_locked() {
        assert!(Stage::Locked.accepts_verify());
        assert!(!Stage::Idle.accepts_verify());
        assert!(!Stage::Processing.accepts_verify());
        assert!(!Stage::Verified.accepts_verify());
    }

    #[test]
    fn test_stage_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Stage::Locked).unwrap(), "\"locked\"");
        let back: Stage = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(back, Stage::Processing);
    }
}
