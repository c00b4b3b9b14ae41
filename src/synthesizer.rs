use rayon::prelude::*;
use std::f32::consts::FRAC_1_SQRT_2;

/// Output channels per frame: front-left, front-right, front-center, back.
pub const SURROUND_CHANNELS: u16 = 4;

/// One output sample frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurroundFrame {
    pub front_left: f32,
    pub front_right: f32,
    pub center_front: f32,
    pub back: f32,
}

impl SurroundFrame {
    /// Blend a stereo pair with its sum/difference signals.
    ///
    /// At `mix = 0` this is the stereo pair with silent center and back; at
    /// `mix = 1` the energy sits entirely in the sum and difference channels,
    /// each scaled by 1/sqrt(2).
    #[inline]
    pub fn blend(left: f32, right: f32, mix: f32) -> Self {
        let dry = 1.0 - mix;
        Self {
            front_left: left * dry,
            front_right: right * dry,
            center_front: FRAC_1_SQRT_2 * (left + right) * mix,
            back: FRAC_1_SQRT_2 * (left - right) * mix,
        }
    }

    /// Samples in output channel order.
    pub fn channels(&self) -> [f32; 4] {
        [self.front_left, self.front_right, self.center_front, self.back]
    }
}

/// Produce one frame per input sample, applying `mix[i]` uniformly to block `i`.
///
/// Samples past the last block with a mix value stay silent, so a
/// `block_size` of 0 gives all-silent output. Blocks are independent and
/// written in parallel.
pub fn synthesize(left: &[f32], right: &[f32], mix: &[f32], block_size: usize) -> Vec<SurroundFrame> {
    debug_assert_eq!(left.len(), right.len());

    let mut frames = vec![SurroundFrame::default(); left.len()];
    if block_size == 0 {
        return frames;
    }

    frames
        .par_chunks_mut(block_size)
        .zip(left.par_chunks(block_size))
        .zip(right.par_chunks(block_size))
        .zip(mix.par_iter())
        .for_each(|(((out, l), r), &m)| {
            for ((frame, &a), &b) in out.iter_mut().zip(l).zip(r) {
                *frame = SurroundFrame::blend(a, b, m);
            }
        });

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mix_passes_stereo_through() {
        let f = SurroundFrame::blend(0.3, -0.7, 0.0);
        assert_eq!(f.channels(), [0.3, -0.7, 0.0, 0.0]);
    }

    #[test]
    fn test_full_mix_moves_to_sum_and_difference() {
        let f = SurroundFrame::blend(0.5, 0.5, 1.0);
        assert_eq!(f.front_left, 0.0);
        assert_eq!(f.front_right, 0.0);
        assert!((f.center_front - FRAC_1_SQRT_2 * 1.0).abs() < 1e-7);
        assert_eq!(f.back, 0.0);

        let g = SurroundFrame::blend(0.5, -0.5, 1.0);
        assert_eq!(g.center_front, 0.0);
        assert!((g.back - FRAC_1_SQRT_2 * 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_partial_mix() {
        let f = SurroundFrame::blend(0.4, 0.2, 0.25);
        assert!((f.front_left - 0.3).abs() < 1e-7);
        assert!((f.front_right - 0.15).abs() < 1e-7);
        assert!((f.center_front - FRAC_1_SQRT_2 * 0.6 * 0.25).abs() < 1e-7);
        assert!((f.back - FRAC_1_SQRT_2 * 0.2 * 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_mix_is_piecewise_constant_per_block() {
        let left = vec![1.0f32; 8];
        let right = vec![0.0f32; 8];
        let frames = synthesize(&left, &right, &[0.0, 0.5], 4);

        assert_eq!(frames.len(), 8);
        for f in &frames[..4] {
            assert_eq!(f.front_left, 1.0);
            assert_eq!(f.center_front, 0.0);
        }
        for f in &frames[4..] {
            assert_eq!(f.front_left, 0.5);
            assert!((f.center_front - FRAC_1_SQRT_2 * 0.5).abs() < 1e-7);
        }
    }

    #[test]
    fn test_samples_without_mix_are_silent() {
        let left = vec![0.5f32; 10];
        let right = vec![-0.5f32; 10];
        let frames = synthesize(&left, &right, &[0.1, 0.2], 4);

        assert_eq!(frames.len(), 10);
        assert!(frames[..8].iter().all(|f| f.front_left != 0.0));
        assert!(frames[8..].iter().all(|f| *f == SurroundFrame::default()));
    }

    #[test]
    fn test_zero_block_size_is_silent() {
        let left = vec![0.5f32; 6];
        let right = vec![0.25f32; 6];
        let frames = synthesize(&left, &right, &[0.5], 0);
        assert_eq!(frames, vec![SurroundFrame::default(); 6]);
    }

    #[test]
    fn test_short_last_block_uses_its_mix() {
        let left = vec![0.5f32; 10];
        let right = vec![0.5f32; 10];
        let frames = synthesize(&left, &right, &[0.0, 0.0, 1.0], 4);

        for f in &frames[8..] {
            assert_eq!(f.front_left, 0.0);
            assert!((f.center_front - FRAC_1_SQRT_2).abs() < 1e-7);
        }
    }
}
