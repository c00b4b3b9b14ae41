use rayon::prelude::*;

use crate::params::TailMode;

/// Pearson correlation coefficient of two equal-length sample runs.
///
/// Returns 0 when either run is constant (the coefficient is 0/0 there) or
/// empty. Accumulates in f64 and clamps to [-1, 1] to absorb rounding.
pub fn pearson(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);

    if is_constant(a) || is_constant(b) {
        return 0.0;
    }

    let mean_a = a.iter().map(|&x| x as f64).sum::<f64>() / n as f64;
    let mean_b = b.iter().map(|&x| x as f64).sum::<f64>() / n as f64;

    let mut cov = 0.0f64;
    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        return 0.0;
    }

    (cov / denom).clamp(-1.0, 1.0) as f32
}

fn is_constant(samples: &[f32]) -> bool {
    samples.iter().all(|&s| s == samples[0])
}

/// Correlation of each non-overlapping block of `block_size` samples.
///
/// With [`TailMode::ShortBlock`] a trailing partial block gets its own
/// coefficient; with [`TailMode::Silence`] it is skipped. Blocks are
/// independent and computed in parallel; the output is in block order.
/// A `block_size` of 0 yields no blocks.
pub fn block_correlations(
    left: &[f32],
    right: &[f32],
    block_size: usize,
    tail: TailMode,
) -> Vec<f32> {
    debug_assert_eq!(left.len(), right.len());
    if block_size == 0 {
        return Vec::new();
    }

    match tail {
        TailMode::Silence => left
            .par_chunks_exact(block_size)
            .zip(right.par_chunks_exact(block_size))
            .map(|(a, b)| pearson(a, b))
            .collect(),
        TailMode::ShortBlock => left
            .par_chunks(block_size)
            .zip(right.par_chunks(block_size))
            .map(|(a, b)| pearson(a, b))
            .collect(),
    }
}
