//! Sampling policy: how ticks perturb instruments and how random mode picks kinds.
//!
//! Every function takes the random source as a parameter so callers decide
//! between entropy-seeded generators (runtime) and fixed seeds (tests).

use rand::Rng;

use crate::kind::MetricKind;

/// Smallest step between burst observations.
pub const MIN_STEP: f64 = 1e-4;
/// Exclusive upper bound of the drawn step.
pub const MAX_STEP: f64 = 0.05;
/// Hard cap on observations per instrument per tick (`1 / MIN_STEP`).
pub const MAX_BURST: usize = 10_000;
/// Exclusive upper bound of per-kind counts in random mode.
pub const RANDOM_MAX_COUNT: usize = 200;

/// Counter/gauge delta: uniform in `[0, 1)`.
pub fn increment<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Arithmetic run of observations `start, start + step, ...` below `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    start: f64,
    step: f64,
}

impl Burst {
    /// Start is folded into `[0, 1)`, step is floored at [`MIN_STEP`].
    pub fn new(start: f64, step: f64) -> Self {
        let start = if start.is_finite() { start.rem_euclid(1.0) } else { 0.0 };
        // rem_euclid may round up to exactly 1.0 for tiny negative inputs
        let start = if start < 1.0 { start } else { 0.0 };
        let step = if step.is_finite() && step > MIN_STEP { step } else { MIN_STEP };
        Self { start, step }
    }

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let start = rng.gen::<f64>();
        let step = rng.gen_range(0.0..MAX_STEP);
        Self::new(start, step)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Never empty, never longer than [`MAX_BURST`].
    pub fn observations(&self) -> impl Iterator<Item = f64> {
        let Burst { start, step } = *self;
        (0..MAX_BURST)
            .map(move |i| start + i as f64 * step)
            .take_while(|v| *v < 1.0)
    }

    pub fn len(&self) -> usize {
        self.observations().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Random mode: choose `2..=4` kinds cyclically from a random start, each with
/// its own count in `0..RANDOM_MAX_COUNT`.
pub fn plan_random<R: Rng + ?Sized>(rng: &mut R) -> Vec<(MetricKind, usize)> {
    let kinds = MetricKind::ALL;
    let start = rng.gen_range(0..kinds.len());
    let amount = rng.gen_range(1..kinds.len());
    let counts: [usize; 4] = [
        rng.gen_range(0..RANDOM_MAX_COUNT),
        rng.gen_range(0..RANDOM_MAX_COUNT),
        rng.gen_range(0..RANDOM_MAX_COUNT),
        rng.gen_range(0..RANDOM_MAX_COUNT),
    ];

    (0..=amount)
        .map(|i| {
            let idx = (start + i) % kinds.len();
            (kinds[idx], counts[idx])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_is_floored() {
        let b = Burst::new(0.0, 0.0);
        assert_eq!(b.step(), MIN_STEP);
        assert_eq!(b.len(), MAX_BURST);
    }

    #[test]
    fn start_folds_into_unit_interval() {
        assert_eq!(Burst::new(1.0, 0.01).start(), 0.0);
        assert!((Burst::new(1.25, 0.01).start() - 0.25).abs() < 1e-12);
        assert_eq!(Burst::new(f64::NAN, 0.01).start(), 0.0);
        assert!(Burst::new(-1e-300, 0.01).start() < 1.0);
    }

    #[test]
    fn late_start_still_observes_once() {
        let b = Burst::new(0.999_99, 0.049);
        assert_eq!(b.observations().collect::<Vec<_>>(), vec![0.999_99]);
    }
}
