//! Low-level random draws shared by operators and initializers
//!
//! The draw order of these helpers is part of the engine's determinism
//! contract: with a fixed seed, every operator consumes uniforms in a fixed
//! sequence, so runs are bit-reproducible. That is also the reason the
//! geometric and Gaussian draws are written out as their closed-form inverse
//! transforms instead of going through distribution types.

use rand::Rng;

/// Draw from a geometric distribution with success probability `p`.
///
/// Returns the 1-based index of the first success. `p >= 1` always returns 1;
/// `p <= 0` returns `usize::MAX` (a stride that never lands inside a genome).
pub fn geometric<R: Rng>(rng: &mut R, p: f64) -> usize {
    if p >= 1.0 {
        return 1;
    }
    if p <= 0.0 {
        return usize::MAX;
    }
    let u = rng.gen_range(f64::EPSILON..1.0);
    let draw = ((1.0 - u).ln() / (1.0 - p).ln()).ceil();
    // Cast saturates for tiny p, which is the intended "never" stride.
    (draw as usize).max(1)
}

/// Draw from a Gaussian via the Box–Muller transform.
///
/// Consumes exactly two uniforms: `sqrt(-2 ln x) * cos(2π y) * sd + mean`.
pub fn gaussian<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let x = rng.gen_range(f64::EPSILON..1.0);
    let y = rng.gen_range(f64::EPSILON..1.0);
    (-2.0 * x.ln()).sqrt() * (std::f64::consts::TAU * y).cos() * sd + mean
}

/// In-place Fisher–Yates shuffle.
///
/// Walks the last index down to 1, swapping each position with a uniform
/// index in `[0, i]`. One uniform per step, highest index first.
pub fn shuffle<R: Rng, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Sample `n` distinct indices uniformly from `0..len`.
///
/// Partial Fisher–Yates over the index range; `n` is clamped to `len`.
pub fn distinct_indices<R: Rng>(rng: &mut R, len: usize, n: usize) -> Vec<usize> {
    let n = n.min(len);
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..n {
        let j = rng.gen_range(i..len);
        indices.swap(i, j);
    }
    indices.truncate(n);
    indices
}
