//! Correlation-driven stereo to four-channel surround upmixing.
//!
//! The left/right channels are cut into fixed blocks, each block's Pearson
//! correlation is smoothed with an exponential moving average, and the
//! smoothed value blends the stereo pair with its sum (front-center) and
//! difference (back) signals. Uncorrelated passages stay stereo; correlated
//! passages, typical of matrix-encoded soundtracks, move to the matrixed
//! channels.
//!
//! ```
//! use resurround::{upmix, StereoBuffer, UpmixParams};
//!
//! let left: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();
//! let input = StereoBuffer::new(left.clone(), left).unwrap();
//!
//! let result = upmix(&input, UpmixParams::default()).unwrap();
//! assert_eq!(result.frames.len(), 4096);
//! assert!(result.mix.last().copied().unwrap() > 0.9);
//! ```

pub mod correlator;
pub mod error;
pub mod input;
pub mod output;
pub mod params;
pub mod report;
pub mod smoother;
pub mod synthesizer;
pub mod upmixer;

pub use error::{Result, UpmixError};
pub use input::{AudioMetadata, StereoBuffer, PCM16_SCALE};
pub use output::OutputFormat;
pub use params::{TailMode, UpmixParams, DEFAULT_BLOCK_SIZE, DEFAULT_SMOOTHING};
pub use report::UpmixReport;
pub use synthesizer::SurroundFrame;
pub use upmixer::{process_file, upmix, Upmix, Upmixer};
