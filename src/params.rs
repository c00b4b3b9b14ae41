use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, UpmixError};

/// Samples per correlation block
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// EMA weight given to each new block (time constant ~20 blocks)
pub const DEFAULT_SMOOTHING: f32 = 0.05;

/// What happens to the samples after the last full block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailMode {
    /// Leave the partial block silent in every output channel.
    Silence,
    /// Correlate and mix the partial block like a full one.
    #[default]
    ShortBlock,
}

/// Fixed-for-the-run upmix parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpmixParams {
    pub block_size: usize,
    pub smoothing: f32,
    pub tail: TailMode,
}

impl Default for UpmixParams {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            smoothing: DEFAULT_SMOOTHING,
            tail: TailMode::default(),
        }
    }
}

impl UpmixParams {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_tail(mut self, tail: TailMode) -> Self {
        self.tail = tail;
        self
    }

    /// A correlation needs at least two samples; the EMA weight must lie in (0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.block_size < 2 {
            return Err(UpmixError::InvalidBlockSize(self.block_size));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(UpmixError::InvalidSmoothing(self.smoothing));
        }
        Ok(())
    }

    /// Number of blocks that receive a correlation and mix value for `frames` samples.
    pub fn block_count(&self, frames: usize) -> usize {
        match self.tail {
            TailMode::Silence => frames / self.block_size,
            TailMode::ShortBlock => frames.div_ceil(self.block_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = UpmixParams::default();
        assert_eq!(params.block_size, 64);
        assert_eq!(params.smoothing, 0.05);
        assert_eq!(params.tail, TailMode::ShortBlock);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let params = UpmixParams::default().with_block_size(1);
        assert!(matches!(params.validate(), Err(UpmixError::InvalidBlockSize(1))));

        for alpha in [0.0, -0.1, 1.5, f32::NAN] {
            let params = UpmixParams::default().with_smoothing(alpha);
            assert!(matches!(params.validate(), Err(UpmixError::InvalidSmoothing(_))));
        }

        assert!(UpmixParams::default().with_smoothing(1.0).validate().is_ok());
    }

    #[test]
    fn test_block_count_by_tail_mode() {
        let params = UpmixParams::default();
        assert_eq!(params.block_count(130), 3);
        assert_eq!(params.with_tail(TailMode::Silence).block_count(130), 2);
        assert_eq!(params.block_count(128), 2);
        assert_eq!(params.with_tail(TailMode::Silence).block_count(128), 2);
        assert_eq!(params.block_count(0), 0);
    }
}
