//! vf-feed: Synthetic "live activity" records
//!
//! Generates social-proof feed entries (user, action verb, prize) from
//! fixed vocabularies. Stateless apart from the injected RNG, so a seeded
//! generator is fully deterministic for tests.

mod generator;
mod vocab;

pub use generator::*;
pub use vocab::*;
