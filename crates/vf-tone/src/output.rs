//! Shared tone output stream
//!
//! One cpal output stream, opened lazily on the first user gesture. Cues
//! are pre-rendered at the device rate; the audio callback only mixes, so
//! it never allocates per tone and never blocks. Triggers cross to the
//! callback over a lock-free rtrb queue.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig, SupportedStreamConfig};
use rtrb::RingBuffer;

use crate::error::{ToneError, ToneResult};
use crate::spec::{render, ToneKind};

/// Max simultaneously sounding cues; extra triggers are dropped
const MAX_VOICES: usize = 32;

/// Trigger queue depth
const QUEUE_CAPACITY: usize = 64;

struct Voice {
    kind: usize,
    pos: usize,
}

/// Handle to the shared output stream
pub struct ToneOutput {
    _stream: Stream,
    trigger_tx: rtrb::Producer<usize>,
    sample_rate: u32,
}

impl ToneOutput {
    /// Open the default output device and start the mix callback
    pub fn open() -> ToneResult<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(ToneError::NoDevice)?;
        let supported = pick_output_config(&device)?;

        let channels = supported.channels() as usize;
        let sample_rate = supported.sample_rate();
        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        // Pre-render every cue at the device rate.
        let tones: Vec<Vec<f32>> = ToneKind::ALL
            .iter()
            .map(|kind| render(&kind.spec(), sample_rate))
            .collect();

        let (trigger_tx, mut trigger_rx) = RingBuffer::<usize>::new(QUEUE_CAPACITY);
        let mut voices: Vec<Voice> = Vec::with_capacity(MAX_VOICES);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Ok(kind) = trigger_rx.pop() {
                        if voices.len() < MAX_VOICES {
                            voices.push(Voice { kind, pos: 0 });
                        }
                    }

                    for frame in data.chunks_mut(channels) {
                        let mut mixed = 0.0f32;
                        for voice in voices.iter_mut() {
                            mixed += tones[voice.kind][voice.pos];
                            voice.pos += 1;
                        }
                        voices.retain(|v| v.pos < tones[v.kind].len());

                        for sample in frame.iter_mut() {
                            *sample = mixed;
                        }
                    }
                },
                move |err| {
                    log::error!("Tone output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| ToneError::StreamBuildError(e.to_string()))?;

        stream
            .play()
            .map_err(|e| ToneError::StreamError(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            trigger_tx,
            sample_rate,
        })
    }

    /// Queue a cue for playback; a full queue drops the trigger
    pub fn trigger(&mut self, kind: ToneKind) {
        if self.trigger_tx.push(kind.index()).is_err() {
            log::debug!("Tone queue full, dropping {}", kind.name());
        }
    }

    /// Device sample rate the cues were rendered at
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn pick_output_config(device: &Device) -> ToneResult<SupportedStreamConfig> {
    let default = device
        .default_output_config()
        .map_err(|e| ToneError::ConfigError(e.to_string()))?;

    if default.sample_format() == SampleFormat::F32 {
        return Ok(default);
    }

    let configs = device
        .supported_output_configs()
        .map_err(|e| ToneError::ConfigError(e.to_string()))?;

    for supported in configs {
        if supported.sample_format() == SampleFormat::F32 {
            return Ok(supported.with_max_sample_rate());
        }
    }

    Err(ToneError::ConfigError(
        "No f32 output config available".to_string(),
    ))
}
