//! Submission form types
//!
//! Field text is owned by the presentation layer; the controller only
//! reads a snapshot at submission time.

use serde::{Deserialize, Serialize};

/// Which tab the form is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// New account: requires username + password + payment handle
    #[default]
    Signup,
    /// Returning claim: requires username + payment handle
    Claim,
}

/// Payout rail selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashApp,
    Venmo,
    PayPal,
}

impl PaymentMethod {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashApp => "Cash App",
            PaymentMethod::Venmo => "Venmo",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

/// Snapshot of the form at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitForm {
    pub auth_mode: AuthMode,
    pub username: String,
    pub password: String,
    pub payment_method: PaymentMethod,
    pub payment_handle: String,
}

impl SubmitForm {
    /// Whether all fields required by the active mode are present
    ///
    /// An incomplete form is rejected locally; no error propagates.
    pub fn is_complete(&self) -> bool {
        if self.username.trim().is_empty() {
            return false;
        }
        if self.auth_mode == AuthMode::Signup && self.password.is_empty() {
            return false;
        }
        !self.payment_handle.is_empty()
    }
}
