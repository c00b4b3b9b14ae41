/// Single-pole EMA over correlation magnitude.
///
/// The sign of the correlation is discarded: only how strongly the channels
/// agree decides how much of the signal moves to the matrixed channels.
#[derive(Debug, Clone)]
pub struct MixSmoother {
    alpha: f32,
    mix: f32,
}

impl MixSmoother {
    /// Start from a mix of 0.
    pub fn new(alpha: f32) -> Self {
        Self { alpha, mix: 0.0 }
    }

    /// Fold in the next block's correlation and return the block's mix.
    pub fn update(&mut self, correlation: f32) -> f32 {
        let next = (1.0 - self.alpha) * self.mix + self.alpha * correlation.abs();
        // small alphas stall just below 1 in f32; large ones can land on 1 exactly
        self.mix = next.min(1.0);
        self.mix
    }
}

/// Mix trajectory for a correlation sequence, computed strictly in block order.
pub fn smooth(correlations: &[f32], alpha: f32) -> Vec<f32> {
    correlations
        .iter()
        .scan(MixSmoother::new(alpha), |smoother, &corr| {
            Some(smoother.update(corr))
        })
        .collect()
}
