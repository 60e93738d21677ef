//! Tone sink seam
//!
//! The session controller talks to audio through [`ToneSink`] only, so
//! hosts can wire the real synth while tests record cues in memory.

use crate::output::ToneOutput;
use crate::spec::ToneKind;

/// Fire-and-forget cue playback
///
/// `play` must never fail from the caller's point of view; sinks swallow
/// and log their own problems.
pub trait ToneSink {
    /// Perform the user-gesture unlock / lazy device open; idempotent
    fn unlock(&mut self) {}

    /// Queue a cue; silent no-op when no output is available
    fn play(&mut self, kind: ToneKind);
}

/// Real synthesizer backed by the shared cpal output
pub struct ToneSynth {
    output: Option<ToneOutput>,
    unlock_attempted: bool,
}

impl ToneSynth {
    pub fn new() -> Self {
        Self {
            output: None,
            unlock_attempted: false,
        }
    }

    /// Whether the output stream is open
    pub fn is_unlocked(&self) -> bool {
        self.output.is_some()
    }
}

impl Default for ToneSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSink for ToneSynth {
    fn unlock(&mut self) {
        if self.unlock_attempted {
            return;
        }
        self.unlock_attempted = true;

        match ToneOutput::open() {
            Ok(output) => {
                log::debug!("Tone output open at {}Hz", output.sample_rate());
                self.output = Some(output);
            }
            Err(e) => {
                // Audio is decoration; the session carries on silently.
                log::warn!("Tone output unavailable: {}", e);
            }
        }
    }

    fn play(&mut self, kind: ToneKind) {
        match self.output.as_mut() {
            Some(output) => output.trigger(kind),
            None => log::trace!("Tone {} before unlock, skipped", kind.name()),
        }
    }
}

/// Sink that discards every cue
pub struct NullSink;

impl ToneSink for NullSink {
    fn play(&mut self, _kind: ToneKind) {}
}

/// Sink that records cues in order, for tests
#[derive(Default)]
pub struct MemorySink {
    pub played: Vec<ToneKind>,
    pub unlocked: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToneSink for MemorySink {
    fn unlock(&mut self) {
        self.unlocked = true;
    }

    fn play(&mut self, kind: ToneKind) {
        self.played.push(kind);
    }
}
