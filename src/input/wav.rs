use hound::{SampleFormat, WavReader};
use log::debug;
use std::io::Read;
use std::path::Path;

use super::{AudioMetadata, StereoBuffer};
use crate::error::{Result, UpmixError};

/// Read a stereo WAV file into normalized left/right channels.
/// 16-bit PCM is divided by [`PCM16_SCALE`](super::PCM16_SCALE), other integer
/// depths by 2^(bits-1); float samples pass through.
pub fn read_stereo_wav<P: AsRef<Path>>(path: P) -> Result<(StereoBuffer, AudioMetadata)> {
    let reader = WavReader::open(path)?;
    read_stereo(reader)
}

/// Same as [`read_stereo_wav`] for any byte source.
pub fn read_stereo<R: Read>(reader: WavReader<R>) -> Result<(StereoBuffer, AudioMetadata)> {
    let spec = reader.spec();

    if spec.channels != 2 {
        return Err(UpmixError::ChannelCount {
            found: spec.channels,
        });
    }

    debug!(
        "WAV header: {} Hz, {} bit {:?}",
        spec.sample_rate, spec.bits_per_sample, spec.sample_format
    );

    let buffer = match spec.sample_format {
        SampleFormat::Float => read_float_samples(reader)?,
        SampleFormat::Int if spec.bits_per_sample == 16 => read_pcm16_samples(reader)?,
        SampleFormat::Int => read_int_samples(reader, spec.bits_per_sample)?,
    };

    let metadata = AudioMetadata {
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        sample_format: spec.sample_format,
        frames: buffer.len(),
    };

    Ok((buffer, metadata))
}

fn read_float_samples<R: Read>(reader: WavReader<R>) -> Result<StereoBuffer> {
    let samples = reader
        .into_samples::<f32>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(StereoBuffer::from_interleaved(&samples))
}

fn read_pcm16_samples<R: Read>(reader: WavReader<R>) -> Result<StereoBuffer> {
    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(StereoBuffer::from_pcm16(&samples))
}

fn read_int_samples<R: Read>(reader: WavReader<R>, bits: u16) -> Result<StereoBuffer> {
    if !(8..=32).contains(&bits) {
        return Err(UpmixError::UnsupportedFormat(format!(
            "{}-bit integer PCM",
            bits
        )));
    }
    let max_val = (1i64 << (bits - 1)) as f32;

    let samples = reader
        .into_samples::<i32>()
        .map(|s| s.map(|v| v as f32 / max_val))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(StereoBuffer::from_interleaved(&samples))
}
