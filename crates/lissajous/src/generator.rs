//! Lissajous curve sampling.
//!
//! A Lissajous figure is traced by two perpendicular oscillations:
//!   x(t) = sin(freq_x * t + phase_shift)
//!   y(t) = sin(freq_y * t)
//!
//! Both axes use sine; the relative phase lives on the x axis. The curve is
//! sampled uniformly over one period `t ∈ [0, 2π]`, both ends included, so
//! for integer frequencies the first and last samples coincide and the
//! polyline closes on itself.

use std::f64::consts::TAU;

use crate::geometry::{Bounds, Point};

/// Smallest point count that still has a distinct start and end sample.
pub const MIN_RESOLUTION: usize = 2;

/// Point count used by `CurveGenerator::default()`.
pub const DEFAULT_RESOLUTION: usize = 100;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    #[error("invalid argument: resolution must be at least 2, got {0}")]
    InvalidArgument(usize),
}

/// Parameters for a single render request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    pub resolution: usize,
    pub freq_x: f64,
    pub freq_y: f64,
    pub phase_shift: f64,
}

impl GenerationParameters {
    /// Parameters with no phase shift.
    pub fn new(resolution: usize, freq_x: f64, freq_y: f64) -> Self {
        Self {
            resolution,
            freq_x,
            freq_y,
            phase_shift: 0.0,
        }
    }

    pub fn with_phase_shift(mut self, phase_shift: f64) -> Self {
        self.phase_shift = phase_shift;
        self
    }
}

/// A sampled curve: two coordinate sequences of equal length.
///
/// The fields are private so a figure can't be edited after
/// `CurveGenerator::generate` hands it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Figure {
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Samples as points, in time order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.points())
    }
}

/// Produces figures at a fixed resolution.
///
/// The resolution is the only state; `generate` is otherwise a pure function
/// of its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveGenerator {
    resolution: usize,
}

impl Default for CurveGenerator {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl CurveGenerator {
    pub fn new(resolution: usize) -> Result<Self, GeneratorError> {
        let mut generator = Self::default();
        generator.set_resolution(resolution)?;
        Ok(generator)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Set the point count for subsequent calls.
    ///
    /// Rejects anything below `MIN_RESOLUTION` and leaves the current value in
    /// place when it does.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<(), GeneratorError> {
        if resolution < MIN_RESOLUTION {
            return Err(GeneratorError::InvalidArgument(resolution));
        }
        self.resolution = resolution;
        Ok(())
    }

    /// Sample the curve at the stored resolution.
    pub fn generate(&self, freq_x: f64, freq_y: f64, phase_shift: f64) -> Figure {
        let n = self.resolution;
        let last = n - 1;
        let step = TAU / last as f64;

        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);

        for i in 0..n {
            // Pin the final sample to exactly 2π instead of accumulating `step`.
            let t = if i == last { TAU } else { i as f64 * step };
            x.push((freq_x * t + phase_shift).sin());
            y.push((freq_y * t).sin());
        }

        Figure { x, y }
    }

    /// Apply `params.resolution`, then sample with the remaining parameters.
    ///
    /// On an invalid resolution nothing is generated and the stored
    /// resolution is kept.
    pub fn generate_with(&mut self, params: &GenerationParameters) -> Result<Figure, GeneratorError> {
        self.set_resolution(params.resolution)?;
        Ok(self.generate(params.freq_x, params.freq_y, params.phase_shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn lengths_match_resolution() {
        for n in [2, 3, 10, 100, 1001] {
            let g = CurveGenerator::new(n).unwrap();
            let fig = g.generate(3.0, 2.0, 0.5);
            assert_eq!(fig.x().len(), n);
            assert_eq!(fig.y().len(), n);
            assert_eq!(fig.len(), n);
        }
    }

    #[test]
    fn first_sample_is_at_t_zero() {
        let g = CurveGenerator::default();
        let phase = 0.7;
        let fig = g.generate(2.0, 3.0, phase);
        assert_eq!(fig.x()[0], phase.sin());
        assert_eq!(fig.y()[0], 0.0);
    }

    #[test]
    fn curve_closes_on_itself() {
        let g = CurveGenerator::new(257).unwrap();
        let fig = g.generate(5.0, 4.0, PI / 3.0);
        let n = fig.len();
        assert!((fig.x()[n - 1] - fig.x()[0]).abs() < 1e-9);
        assert!((fig.y()[n - 1] - fig.y()[0]).abs() < 1e-9);
    }

    #[test]
    fn two_samples_are_both_ends() {
        let g = CurveGenerator::new(2).unwrap();
        let fig = g.generate(1.0, 1.0, 0.0);
        assert_eq!(fig.x()[0], 0.0);
        assert!(fig.x()[1].abs() < 1e-12);
    }

    #[test]
    fn generate_is_deterministic() {
        let g = CurveGenerator::new(333).unwrap();
        let a = g.generate(1.5, 2.25, 0.1);
        let b = g.generate(1.5, 2.25, 0.1);
        assert_eq!(a, b);
        // Bit-for-bit, not just approximately
        for (u, v) in a.x().iter().zip(b.x()) {
            assert_eq!(u.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn zero_freq_x_gives_constant_x() {
        let g = CurveGenerator::default();
        let phase = 1.2;
        let fig = g.generate(0.0, 3.0, phase);
        assert!(fig.x().iter().all(|&x| x == phase.sin()));

        let flat = g.generate(0.0, 3.0, 0.0);
        assert!(flat.x().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn negative_frequencies_are_fine() {
        let g = CurveGenerator::new(50).unwrap();
        let fig = g.generate(-2.0, -3.0, 0.0);
        assert_eq!(fig.len(), 50);
        assert!(fig.x().iter().chain(fig.y()).all(|v| v.is_finite()));
    }

    #[test]
    fn figure_eight_scenario() {
        let g = CurveGenerator::new(100).unwrap();
        let fig = g.generate(2.0, 3.0, 0.0);
        assert_eq!(fig.x()[0], 0.0);
        assert_eq!(fig.y()[0], 0.0);
        assert!((fig.x()[99] - fig.x()[0]).abs() < 1e-3);
    }

    #[test]
    fn samples_stay_in_unit_square() {
        let g = CurveGenerator::new(500).unwrap();
        let fig = g.generate(7.0, 3.0, 0.3);
        let b = fig.bounds().unwrap();
        assert!(b.min_x >= -1.0 && b.max_x <= 1.0);
        assert!(b.min_y >= -1.0 && b.max_y <= 1.0);
    }

    #[test]
    fn set_resolution_zero_is_rejected() {
        let mut g = CurveGenerator::new(42).unwrap();
        assert_eq!(g.set_resolution(0), Err(GeneratorError::InvalidArgument(0)));
        assert_eq!(g.resolution(), 42);
    }

    #[test]
    fn set_resolution_one_is_rejected() {
        let mut g = CurveGenerator::default();
        assert!(g.set_resolution(1).is_err());
        assert_eq!(g.resolution(), DEFAULT_RESOLUTION);
        assert!(CurveGenerator::new(1).is_err());
    }

    #[test]
    fn generate_with_applies_resolution() {
        let mut g = CurveGenerator::default();
        let params = GenerationParameters::new(64, 3.0, 2.0).with_phase_shift(PI / 2.0);
        let fig = g.generate_with(&params).unwrap();
        assert_eq!(fig.len(), 64);
        assert_eq!(g.resolution(), 64);
        assert_eq!(fig.x()[0], (PI / 2.0).sin());
    }

    #[test]
    fn generate_with_bad_resolution_keeps_state() {
        let mut g = CurveGenerator::new(80).unwrap();
        let params = GenerationParameters::new(1, 3.0, 2.0);
        assert!(g.generate_with(&params).is_err());
        assert_eq!(g.resolution(), 80);
    }
}
