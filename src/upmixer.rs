use log::{debug, info, warn};
use std::path::Path;

use crate::correlator::block_correlations;
use crate::error::Result;
use crate::input::wav::read_stereo_wav;
use crate::input::{AudioMetadata, StereoBuffer};
use crate::output::{write_surround, OutputFormat};
use crate::params::{TailMode, UpmixParams};
use crate::smoother::smooth;
use crate::synthesizer::{synthesize, SurroundFrame};

/// Result of one upmix pass
#[derive(Debug, Clone, Default)]
pub struct Upmix {
    /// One frame per input sample
    pub frames: Vec<SurroundFrame>,
    /// Per-block Pearson correlation
    pub correlations: Vec<f32>,
    /// Per-block smoothed mix weight
    pub mix: Vec<f32>,
}

/// Correlation-driven stereo to four-channel upmixer
#[derive(Debug, Clone)]
pub struct Upmixer {
    params: UpmixParams,
}

impl Upmixer {
    pub fn new(params: UpmixParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &UpmixParams {
        &self.params
    }

    /// Run the three stages over an in-memory buffer.
    pub fn process(&self, input: &StereoBuffer) -> Upmix {
        let UpmixParams {
            block_size,
            smoothing,
            tail,
        } = self.params;

        if tail == TailMode::Silence && input.len() % block_size != 0 {
            warn!(
                "Dropping {} trailing sample(s) that do not fill a {}-sample block",
                input.len() % block_size,
                block_size
            );
        }

        let correlations = block_correlations(input.left(), input.right(), block_size, tail);
        let mix = smooth(&correlations, smoothing);
        debug_assert_eq!(mix.len(), self.params.block_count(input.len()));
        let frames = synthesize(input.left(), input.right(), &mix, block_size);

        debug!(
            "Upmixed {} frames in {} block(s), final mix {:.3}",
            frames.len(),
            mix.len(),
            mix.last().copied().unwrap_or(0.0)
        );

        Upmix {
            frames,
            correlations,
            mix,
        }
    }
}

/// Upmix an in-memory buffer with the given parameters.
pub fn upmix(input: &StereoBuffer, params: UpmixParams) -> Result<Upmix> {
    Ok(Upmixer::new(params)?.process(input))
}

/// Read a stereo WAV, upmix it and write the four-channel result.
pub fn process_file(
    input_path: &Path,
    output_path: &Path,
    params: UpmixParams,
    format: OutputFormat,
) -> Result<(AudioMetadata, Upmix)> {
    let upmixer = Upmixer::new(params)?;

    let (buffer, metadata) = read_stereo_wav(input_path)?;
    info!(
        "Loaded {} frames at {} Hz ({:.2}s)",
        metadata.frames,
        metadata.sample_rate,
        metadata.duration_secs()
    );
    let active = upmixer.params();
    debug!(
        "Block size {}, smoothing {}, tail {:?}, output {:?}",
        active.block_size, active.smoothing, active.tail, format
    );

    let result = upmixer.process(&buffer);

    write_surround(output_path, &result.frames, metadata.sample_rate, format)?;
    info!("Wrote {}", output_path.display());

    Ok((metadata, result))
}
