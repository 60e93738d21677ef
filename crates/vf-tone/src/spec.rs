//! Tone definitions and rendering
//!
//! Every cue the session plays is one short oscillator burst with a fixed
//! frequency and gain envelope. The shapes are part of the product (they
//! are what the user hears at each step), so they live here as data and
//! rendering is a pure function over them.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Named tone cue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneKind {
    /// Step progress blip
    Tick,
    /// Reward / confirmation chime
    Coin,
    /// Low warning buzz
    Alert,
    /// Very short counter blip (reward rollup)
    Count,
    /// UI interaction click
    Click,
    /// Rising arpeggio on sequence start
    Success,
}

impl ToneKind {
    /// All kinds, in a stable order usable as an index
    pub const ALL: [ToneKind; 6] = [
        ToneKind::Tick,
        ToneKind::Coin,
        ToneKind::Alert,
        ToneKind::Count,
        ToneKind::Click,
        ToneKind::Success,
    ];

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ToneKind::Tick => "tick",
            ToneKind::Coin => "coin",
            ToneKind::Alert => "alert",
            ToneKind::Count => "count",
            ToneKind::Click => "click",
            ToneKind::Success => "success",
        }
    }

    /// Stable index into [`ToneKind::ALL`]
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            ToneKind::Tick => 0,
            ToneKind::Coin => 1,
            ToneKind::Alert => 2,
            ToneKind::Count => 3,
            ToneKind::Click => 4,
            ToneKind::Success => 5,
        }
    }

    /// The fixed synthesis spec for this cue
    pub fn spec(&self) -> ToneSpec {
        match self {
            ToneKind::Tick => ToneSpec {
                waveform: Waveform::Square,
                freq: FreqEnvelope::ExpRamp {
                    start_hz: 800.0,
                    end_hz: 200.0,
                },
                gain: GainEnvelope::Linear { attack: 0.05 },
                duration_ms: 50.0,
            },
            ToneKind::Coin => ToneSpec {
                waveform: Waveform::Sine,
                freq: FreqEnvelope::ExpRamp {
                    start_hz: 1200.0,
                    end_hz: 1800.0,
                },
                gain: GainEnvelope::Linear { attack: 0.05 },
                duration_ms: 500.0,
            },
            ToneKind::Alert => ToneSpec {
                waveform: Waveform::Sawtooth,
                freq: FreqEnvelope::LinearRamp {
                    start_hz: 200.0,
                    end_hz: 150.0,
                },
                gain: GainEnvelope::Linear { attack: 0.1 },
                duration_ms: 300.0,
            },
            ToneKind::Count => ToneSpec {
                waveform: Waveform::Triangle,
                freq: FreqEnvelope::Constant { hz: 600.0 },
                gain: GainEnvelope::Linear { attack: 0.02 },
                duration_ms: 30.0,
            },
            ToneKind::Click => ToneSpec {
                waveform: Waveform::Sine,
                freq: FreqEnvelope::ExpRamp {
                    start_hz: 2000.0,
                    end_hz: 1000.0,
                },
                gain: GainEnvelope::Exponential {
                    attack: 0.05,
                    floor: 0.01,
                },
                duration_ms: 50.0,
            },
            // Major arpeggio: A4 -> C#5 -> E5
            ToneKind::Success => ToneSpec {
                waveform: Waveform::Triangle,
                freq: FreqEnvelope::Steps {
                    steps: vec![(0.0, 440.0), (100.0, 554.0), (200.0, 659.0)],
                },
                gain: GainEnvelope::Linear { attack: 0.1 },
                duration_ms: 600.0,
            },
        }
    }
}

/// Oscillator waveform shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at phase p in [0, 1)
    #[inline]
    pub fn sample(&self, p: f32) -> f32 {
        match self {
            Waveform::Sine => (p * TAU).sin(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Triangle => 4.0 * (p - 0.5).abs() - 1.0,
        }
    }
}

/// Frequency envelope over the tone duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreqEnvelope {
    /// Fixed pitch
    Constant { hz: f32 },
    /// Linear sweep from start to end
    LinearRamp { start_hz: f32, end_hz: f32 },
    /// Exponential sweep from start to end
    ExpRamp { start_hz: f32, end_hz: f32 },
    /// Stepped pitches: (at_ms, hz), sorted by at_ms
    Steps { steps: Vec<(f32, f32)> },
}

impl FreqEnvelope {
    /// Instantaneous frequency at time t (ms) within a tone of `duration_ms`
    pub fn at(&self, t_ms: f32, duration_ms: f32) -> f32 {
        let x = (t_ms / duration_ms).clamp(0.0, 1.0);
        match self {
            FreqEnvelope::Constant { hz } => *hz,
            FreqEnvelope::LinearRamp { start_hz, end_hz } => start_hz + (end_hz - start_hz) * x,
            FreqEnvelope::ExpRamp { start_hz, end_hz } => start_hz * (end_hz / start_hz).powf(x),
            FreqEnvelope::Steps { steps } => {
                let mut hz = steps.first().map(|s| s.1).unwrap_or(0.0);
                for &(at_ms, step_hz) in steps {
                    if t_ms >= at_ms {
                        hz = step_hz;
                    }
                }
                hz
            }
        }
    }
}

/// Gain envelope: attack level decaying to silence over the tone duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainEnvelope {
    /// Linear decay from attack to 0
    Linear { attack: f32 },
    /// Exponential decay from attack to floor
    Exponential { attack: f32, floor: f32 },
}

impl GainEnvelope {
    /// Peak (attack) gain
    #[inline]
    pub fn attack(&self) -> f32 {
        match self {
            GainEnvelope::Linear { attack } => *attack,
            GainEnvelope::Exponential { attack, .. } => *attack,
        }
    }

    /// Instantaneous gain at time t (ms) within a tone of `duration_ms`
    pub fn at(&self, t_ms: f32, duration_ms: f32) -> f32 {
        let x = (t_ms / duration_ms).clamp(0.0, 1.0);
        match self {
            GainEnvelope::Linear { attack } => attack * (1.0 - x),
            GainEnvelope::Exponential { attack, floor } => attack * (floor / attack).powf(x),
        }
    }
}

/// Full synthesis spec for one cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub freq: FreqEnvelope,
    pub gain: GainEnvelope,
    /// Total duration in milliseconds (cues stay under 600ms)
    pub duration_ms: f32,
}

/// Render a tone spec to mono PCM at the given sample rate
///
/// Pure function; phase accumulates against the instantaneous frequency so
/// sweeps stay click-free.
pub fn render(spec: &ToneSpec, sample_rate: u32) -> Vec<f32> {
    let num_samples = (sample_rate as f32 * spec.duration_ms / 1000.0) as usize;
    let mut samples = Vec::with_capacity(num_samples);

    let mut phase = 0.0f32;
    for i in 0..num_samples {
        let t_ms = i as f32 / sample_rate as f32 * 1000.0;
        let freq = spec.freq.at(t_ms, spec.duration_ms);
        let gain = spec.gain.at(t_ms, spec.duration_ms);

        samples.push(spec.waveform.sample(phase) * gain);

        phase += freq / sample_rate as f32;
        if phase >= 1.0 {
            phase -= 1.0;
        }
    }

    samples
}
