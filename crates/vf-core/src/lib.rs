//! vf-core: Shared types and utilities for VaultForge
//!
//! This crate provides the foundational pieces used across all VaultForge
//! crates: easing curves for value animation, and the cooperative
//! single-threaded scheduler that drives every timed task in a claim
//! session (step sequence, reward rollup, coupon debounce, ambient
//! market intervals).

mod curve;
mod sched;

pub use curve::*;
pub use sched::*;
