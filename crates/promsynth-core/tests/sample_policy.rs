//! Burst bounds and random-mode planning.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use promsynth_core::sample::{plan_random, Burst, MAX_BURST, MIN_STEP, RANDOM_MAX_COUNT};

#[test]
fn drawn_bursts_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let b = Burst::draw(&mut rng);
        assert!(b.step() >= MIN_STEP);
        let obs: Vec<f64> = b.observations().collect();
        assert!(!obs.is_empty());
        assert!(obs.len() <= MAX_BURST);
        assert!(obs.iter().all(|v| (0.0..1.0).contains(v)));
        assert_eq!(obs[0], b.start());
    }
}

#[test]
fn random_plan_is_deterministic_under_seed() {
    let a = plan_random(&mut StdRng::seed_from_u64(99));
    let b = plan_random(&mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn random_plan_picks_two_to_four_distinct_kinds() {
    for seed in 0..200 {
        let plan = plan_random(&mut StdRng::seed_from_u64(seed));
        assert!((2..=4).contains(&plan.len()), "seed={seed}");

        let kinds: HashSet<_> = plan.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds.len(), plan.len(), "kinds must not repeat, seed={seed}");
        assert!(plan.iter().all(|(_, n)| *n < RANDOM_MAX_COUNT));
    }
}
