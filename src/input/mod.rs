pub mod wav;

use hound::SampleFormat;

use crate::error::{Result, UpmixError};

/// Divisor that maps 16-bit signed PCM onto [-1, 1).
pub const PCM16_SCALE: f32 = 32768.0;

/// Two sample-aligned channels normalized to [-1, 1]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
}

impl StereoBuffer {
    /// Build a buffer from separate channels, rejecting unequal lengths.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Result<Self> {
        if left.len() != right.len() {
            return Err(UpmixError::LengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(Self { left, right })
    }

    /// Split interleaved L/R samples. A dangling final sample is ignored.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let (left, right) = samples
            .chunks_exact(2)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }

    /// Normalize 16-bit PCM frames by [`PCM16_SCALE`].
    pub fn from_pcm16(samples: &[i16]) -> Self {
        let (left, right) = samples
            .chunks_exact(2)
            .map(|frame| (frame[0] as f32 / PCM16_SCALE, frame[1] as f32 / PCM16_SCALE))
            .unzip();
        Self { left, right }
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Number of sample frames (samples per channel)
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Metadata about the source recording
#[derive(Debug, Clone)]
pub struct AudioMetadata {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
    pub frames: usize,
}

impl AudioMetadata {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}
