//! vf-session: The staged claim session core
//!
//! Owns the session state machine and every timer around it:
//!
//! - **Stage progression** `idle → processing → locked → verified`, one
//!   way only, driven by user intents and the 10-step timed sequence.
//! - **Reward rollup** — eased counter animation toward the ambient bonus
//!   value sampled at animation start.
//! - **Coupon validation** — debounced, generation-tagged resolution so a
//!   burst of edits yields exactly one final result (last edit wins).
//! - **Ambient market** — background scarcity numbers (slots, players,
//!   bonus pool, rotating ticker) on their own intervals, independent of
//!   stage.
//!
//! Everything timed runs on one [`vf_core::Scheduler`] owned by the
//! [`SessionController`]; the host drives virtual time with
//! [`SessionController::tick`] and tears the whole session down with
//! [`SessionController::shutdown`]. No threads, no real clocks.

mod controller;
mod coupon;
mod form;
mod logline;
mod market;
mod stage;

pub use controller::*;
pub use coupon::*;
pub use form::*;
pub use logline::*;
pub use market::*;
pub use stage::*;
