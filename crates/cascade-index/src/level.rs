//! Random level assignment.
//!
//! `level = floor(-ln(U) * level_factor)` with `U` uniform in `(0, 1]`.
//! Each layer holds roughly `e^(-1/level_factor)` of the one below it; with
//! the default `1/ln 2` every layer is about half as populated.

use rand::Rng;

/// Draw a level from `rng`, capped at `cap`.
pub fn draw_level<R: Rng>(rng: &mut R, level_factor: f64, cap: usize) -> usize {
    // gen() is in [0, 1); flip it so ln() never sees zero.
    let u = 1.0 - rng.gen::<f64>();
    level_from_uniform(u, level_factor, cap)
}

/// Map a uniform sample to a level.
pub fn level_from_uniform(u: f64, level_factor: f64, cap: usize) -> usize {
    let level = (-u.ln() * level_factor).floor();
    if level.is_finite() && level > 0.0 {
        (level as usize).min(cap)
    } else {
        0
    }
}
