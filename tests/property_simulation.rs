// tests/property_simulation.rs

use proptest::prelude::*;
use rollsim::engine::{convergence_bound, Simulation};
use rollsim::fleet::Environment;

fn fleet_strategy() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0..6u32, 0..25)
}

proptest! {
    #[test]
    fn rollout_is_monotonic_bounded_and_converges(
        delays in fleet_strategy(),
        concurrency in 1..6usize,
    ) {
        let bound = convergence_bound(delays.iter().copied(), concurrency)
            .expect("positive limit always has a bound");
        let mut sim = Simulation::new(Environment::from_delays(delays.clone()), concurrency);
        let mut previous = sim.environment().states();

        loop {
            let summary = sim.do_tick().expect("scheduling never violates a transition guard");
            let current = sim.environment().states();

            // Conservation: fixed membership, every machine in exactly one state.
            prop_assert_eq!(current.len(), delays.len());
            prop_assert_eq!(summary.counts.total(), delays.len());
            prop_assert_eq!(summary.total_machines, delays.len());

            // Monotonicity.
            for (before, after) in previous.iter().zip(current.iter()) {
                prop_assert!(
                    before.rank() <= after.rank(),
                    "state regressed from {} to {}", before, after
                );
            }

            // Concurrency bound, both at admission time and after the tick.
            prop_assert!(summary.progressed <= concurrency);
            prop_assert!(summary.counts.updating <= concurrency);

            prop_assert!(summary.tick <= bound, "tick {} exceeded bound {}", summary.tick, bound);

            previous = current;
            if summary.complete {
                break;
            }
        }

        prop_assert!(sim.environment().all_machines().iter().all(|m| m.is_new()));
    }

    #[test]
    fn zero_limit_admits_nobody(delays in proptest::collection::vec(0..6u32, 1..10), ticks in 1..30u64) {
        let mut sim = Simulation::new(Environment::from_delays(delays.clone()), 0);
        for _ in 0..ticks {
            let summary = sim.do_tick().expect("no transitions are attempted");
            prop_assert_eq!(summary.admitted, 0);
            prop_assert!(!summary.complete);
        }
        prop_assert_eq!(sim.environment().counts().old, delays.len());
    }
}
