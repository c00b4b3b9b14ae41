use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::input::AudioMetadata;
use crate::params::{TailMode, UpmixParams};
use crate::upmixer::Upmix;

/// Blocks with a mix above this are counted as predominantly matrixed.
const SURROUND_MIX_THRESHOLD: f32 = 0.5;

/// Summary of an upmix run, serialized with `--report`
#[derive(Debug, Clone, Serialize)]
pub struct UpmixReport {
    pub input: String,
    pub output: String,
    pub generated_at: DateTime<Local>,
    pub sample_rate: u32,
    pub frames: usize,
    pub duration_secs: f64,
    pub block_size: usize,
    pub smoothing: f32,
    pub tail: TailMode,
    pub blocks: usize,
    pub mean_abs_correlation: f32,
    pub mean_mix: f32,
    pub peak_mix: f32,
    /// Fraction of blocks whose mix exceeds 0.5
    pub surround_fraction: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_trace: Option<BlockTrace>,
}

/// Per-block correlation and mix trajectory
#[derive(Debug, Clone, Serialize)]
pub struct BlockTrace {
    pub correlation: Vec<f32>,
    pub mix: Vec<f32>,
}

impl UpmixReport {
    pub fn new(
        input: &Path,
        output: &Path,
        metadata: &AudioMetadata,
        params: &UpmixParams,
        result: &Upmix,
        include_blocks: bool,
    ) -> Self {
        let blocks = result.mix.len();

        let block_trace = include_blocks.then(|| BlockTrace {
            correlation: result.correlations.clone(),
            mix: result.mix.clone(),
        });

        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            generated_at: Local::now(),
            sample_rate: metadata.sample_rate,
            frames: metadata.frames,
            duration_secs: metadata.duration_secs(),
            block_size: params.block_size,
            smoothing: params.smoothing,
            tail: params.tail,
            blocks,
            mean_abs_correlation: mean(result.correlations.iter().map(|c| c.abs())),
            mean_mix: mean(result.mix.iter().copied()),
            peak_mix: result.mix.iter().copied().fold(0.0f32, f32::max),
            surround_fraction: if blocks == 0 {
                0.0
            } else {
                result
                    .mix
                    .iter()
                    .filter(|&&m| m > SURROUND_MIX_THRESHOLD)
                    .count() as f32
                    / blocks as f32
            },
            block_trace,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0f64, 0usize), |(sum, count), v| (sum + v as f64, count + 1));
    if count == 0 {
        0.0
    } else {
        (sum / count as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::SampleFormat;

    fn metadata() -> AudioMetadata {
        AudioMetadata {
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
            frames: 256,
        }
    }

    fn result() -> Upmix {
        Upmix {
            frames: Vec::new(),
            correlations: vec![1.0, -0.6, 0.2, 0.0],
            mix: vec![0.2, 0.6, 0.8, 0.4],
        }
    }

    #[test]
    fn test_summary_statistics() {
        let report = UpmixReport::new(
            Path::new("in.wav"),
            Path::new("out.wav"),
            &metadata(),
            &UpmixParams::default(),
            &result(),
            false,
        );

        assert_eq!(report.blocks, 4);
        assert!((report.mean_abs_correlation - 0.45).abs() < 1e-6);
        assert!((report.mean_mix - 0.5).abs() < 1e-6);
        assert_eq!(report.peak_mix, 0.8);
        assert_eq!(report.surround_fraction, 0.5);
        assert!(report.block_trace.is_none());
    }

    #[test]
    fn test_json_fields() {
        let report = UpmixReport::new(
            Path::new("in.wav"),
            Path::new("out.wav"),
            &metadata(),
            &UpmixParams::default().with_tail(TailMode::Silence),
            &result(),
            true,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input"], "in.wav");
        assert_eq!(json["tail"], "silence");
        assert_eq!(json["block_size"], 64);
        assert_eq!(json["block_trace"]["mix"].as_array().unwrap().len(), 4);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_empty_run() {
        let report = UpmixReport::new(
            Path::new("in.wav"),
            Path::new("out.wav"),
            &metadata(),
            &UpmixParams::default(),
            &Upmix::default(),
            false,
        );
        assert_eq!(report.blocks, 0);
        assert_eq!(report.mean_mix, 0.0);
        assert_eq!(report.surround_fraction, 0.0);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("block_trace").is_none());
    }
}
