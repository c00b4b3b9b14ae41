use hound::{SampleFormat, WavSpec, WavWriter};
use log::warn;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::input::PCM16_SCALE;
use crate::synthesizer::{SurroundFrame, SURROUND_CHANNELS};

/// Sample encoding of the four-channel output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 32-bit IEEE float; keeps the center channel's headroom above full scale.
    #[default]
    Float32,
    /// 16-bit PCM, clamped at full scale.
    Pcm16,
}

/// Write surround frames in the given encoding.
pub fn write_surround<P: AsRef<Path>>(
    path: P,
    frames: &[SurroundFrame],
    sample_rate: u32,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Float32 => write_surround_wav_float32(path, frames, sample_rate),
        OutputFormat::Pcm16 => write_surround_wav(path, frames, sample_rate),
    }
}

/// Write surround frames to a WAV file (4-channel int16 PCM)
pub fn write_surround_wav<P: AsRef<Path>>(
    path: P,
    frames: &[SurroundFrame],
    sample_rate: u32,
) -> Result<()> {
    let writer = WavWriter::create(path, pcm16_spec(sample_rate))?;
    write_pcm16(writer, frames)
}

/// Write surround frames to a WAV file (4-channel float32, no quantization)
pub fn write_surround_wav_float32<P: AsRef<Path>>(
    path: P,
    frames: &[SurroundFrame],
    sample_rate: u32,
) -> Result<()> {
    let writer = WavWriter::create(path, float32_spec(sample_rate))?;
    write_float32(writer, frames)
}

fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: SURROUND_CHANNELS,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn float32_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: SURROUND_CHANNELS,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Scale a normalized sample back to i16, saturating at full scale.
#[inline]
pub fn quantize_pcm16(sample: f32) -> i16 {
    (sample * PCM16_SCALE).round().clamp(-32768.0, 32767.0) as i16
}

fn write_pcm16<W: Write + Seek>(mut writer: WavWriter<W>, frames: &[SurroundFrame]) -> Result<()> {
    let mut clipped = 0usize;

    for frame in frames {
        for sample in frame.channels() {
            if !(-32768.0..=32767.0).contains(&(sample * PCM16_SCALE).round()) {
                clipped += 1;
            }
            writer.write_sample(quantize_pcm16(sample))?;
        }
    }

    writer.finalize()?;

    if clipped > 0 {
        warn!(
            "{} sample(s) clipped during 16-bit conversion; drop --pcm16 to keep full range",
            clipped
        );
    }
    Ok(())
}

fn write_float32<W: Write + Seek>(mut writer: WavWriter<W>, frames: &[SurroundFrame]) -> Result<()> {
    for frame in frames {
        for sample in frame.channels() {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// `<stem>_surround.wav` next to the input file
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_surround.wav", stem))
}
