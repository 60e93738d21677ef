//! Process log line builders
//!
//! Every line the 10-step sequence can emit, as functions of the
//! submitted form. Fixed lines are constants; the two filler slots pick
//! from [`filler_pool`] with the session RNG.

use crate::form::PaymentMethod;

pub const INIT_LINE: &str = "> INITIALIZING SECURE UPLINK...";
pub const ELIGIBILITY_LINE: &str = "> CHECKING BONUS ELIGIBILITY...";
pub const TUNNEL_LINE: &str = "> SECURE TUNNEL ESTABLISHED";
pub const DECRYPT_LINE: &str = "> DECRYPTING REWARD PACKETS...";
pub const FINALIZE_LINE: &str = "> FINALIZING TRANSACTION...";
pub const VERIFICATION_LINE: &str = "> HUMAN VERIFICATION REQUIRED";
pub const CONFIRMED_LINE: &str = "> IDENTITY CONFIRMED";
pub const WELCOME_LINE: &str = "> WELCOME TO THE VAULT";

pub fn auth_line(username: &str) -> String {
    format!("> AUTHENTICATING USER: {}", username.to_uppercase())
}

pub fn gateway_line(method: PaymentMethod) -> String {
    format!(
        "> PINGING {} SECURE SERVER...",
        method.display_name().to_uppercase()
    )
}

pub fn promo_line(code: &str) -> String {
    format!("> APPLYING PROMO: {} (VERIFIED)...", code)
}

pub fn wallet_line(handle: &str) -> String {
    format!("> LINKING WALLET: {}...", handle.to_uppercase())
}

/// First three characters, uppercased, masked
fn masked(text: &str) -> String {
    let head: String = text.chars().take(3).collect();
    format!("{}***", head.to_uppercase())
}

/// Technical filler pool for steps 6-7
pub fn filler_pool(username: &str, method: PaymentMethod, handle: &str) -> Vec<String> {
    let method_name = method.display_name().to_uppercase();
    let user_head: String = username.chars().take(3).collect();

    vec![
        format!("> OPTIMIZING ROUTE TO {} GATEWAY...", method_name),
        format!("> ENCRYPTING PACKETS FOR {}...", masked(handle)),
        format!("> ALLOCATING CLOUD RESOURCES FOR {}...", username.to_uppercase()),
        format!("> BYPASSING {} FIREWALL...", method_name),
        "> VALIDATING BIOMETRIC HASH...".to_string(),
        "> ESTABLISHING PEER-TO-PEER HANDSHAKE...".to_string(),
        "> FLUSHING DNS RESOLVER CACHE...".to_string(),
        format!("> GENERATING 256-BIT KEYS FOR {}...", user_head.to_uppercase()),
        "> COMPRESSING ASSETS (LOSSLESS)...".to_string(),
        "> CHECKING GLOBAL BLOCKLIST...".to_string(),
        format!("> VERIFYING {} API TOKEN...", method_name),
        "> SYNCING WITH MAINNET...".to_string(),
        "> DEFRAGMENTING USER DATABASE...".to_string(),
    ]
}
