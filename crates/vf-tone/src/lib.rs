//! vf-tone: Audio cues for VaultForge
//!
//! Short procedural tones for discrete session events (step ticks, coin
//! rewards, alerts). Each [`ToneKind`] maps to a fixed waveform, frequency
//! envelope, and gain envelope; rendering is a pure function so the exact
//! cue shapes are testable without a device.
//!
//! Playback goes through one shared, lazily-opened output stream:
//!
//! ```text
//! ┌───────────┐  ToneKind   ┌────────────┐  mixed f32  ┌─────────────┐
//! │ ToneSynth │────rtrb────▶│ ToneOutput │────────────▶│ cpal Device │
//! │  .play()  │             │  callback  │             │   output    │
//! └───────────┘             └────────────┘             └─────────────┘
//! ```
//!
//! `play()` is fire-and-forget: before the first `unlock()` it is a silent
//! no-op, and device failures degrade to no-op with a log line. Nothing in
//! this crate ever surfaces an audio failure to the caller.

mod error;
mod output;
mod sink;
mod spec;

pub use error::*;
pub use output::*;
pub use sink::*;
pub use spec::*;
