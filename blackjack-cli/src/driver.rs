use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use rand::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use blackjack_core::prelude::{Estimator, Tally};

/// Trials per batch. Each batch gets its own generator, so the split is
/// part of what a seed reproduces.
pub const BATCH_SIZE: usize = 1000;

#[derive(Copy, Clone, Debug)]
pub struct RunOptions {
    /// Run on a single thread (for profiling)
    pub single_threaded: bool,
    pub seed: u64,
    /// Stop starting new batches once this much time has passed
    pub deadline: Option<Duration>,
}

impl RunOptions {
    pub fn new(single_threaded: bool, seed: Option<u64>, deadline_ms: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        info!(seed, "seeding trial batches");

        Self {
            single_threaded,
            seed,
            deadline: deadline_ms.map(Duration::from_millis),
        }
    }
}

fn batch_sizes(trials: usize) -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..trials.div_ceil(BATCH_SIZE))
        .map(move |index| (index, BATCH_SIZE.min(trials - index * BATCH_SIZE)))
}

/// Run the estimator's configured trials in seeded batches and merge the
/// results. Single and multi-threaded runs of the same seed agree exactly.
pub fn run_batches(estimator: &Estimator<'_>, options: &RunOptions) -> Result<Tally> {
    let trials = estimator.config().trials;
    let started = Instant::now();

    let run_batch = |(index, size): (usize, usize)| -> Result<Tally> {
        if options
            .deadline
            .is_some_and(|deadline| started.elapsed() >= deadline)
        {
            return Ok(Tally::default());
        }

        let mut rng = SmallRng::seed_from_u64(options.seed.wrapping_add(index as u64));
        Ok(estimator.run_trials(size, &mut rng)?)
    };

    let tally = if options.single_threaded {
        batch_sizes(trials)
            .map(run_batch)
            .try_fold(Tally::default(), |total, batch| Ok::<_, anyhow::Error>(total.merge(batch?)))?
    } else {
        batch_sizes(trials)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(run_batch)
            .try_reduce(Tally::default, |left, right| Ok(left.merge(right)))?
    };

    let attempted = tally.completed() + tally.skipped;
    if attempted == 0 && options.deadline.is_some() {
        bail!("deadline reached before any trial completed");
    }
    if attempted < trials as u64 {
        warn!(
            attempted,
            requested = trials,
            "deadline reached before every batch ran"
        );
    }
    debug!(
        wins = tally.wins,
        pushes = tally.pushes,
        losses = tally.losses,
        skipped = tally.skipped,
        elapsed = ?started.elapsed(),
        "batches finished"
    );

    Ok(tally.require_completed()?)
}

#[cfg(test)]
mod tests {
    use blackjack_core::prelude::{Card, EstimatorConfig, Hand, Options, Shoe};

    use super::*;

    fn player_and_shoe() -> (Hand, Shoe) {
        let player = Hand::from_idents("10 7");
        let mut shoe = Shoe::shuffled(2, &mut SmallRng::seed_from_u64(5));
        shoe.remove_specific(Card::TEN).unwrap();
        shoe.remove_specific(Card::from_ident("7")).unwrap();
        (player, shoe)
    }

    #[test]
    fn batch_sizes_test() {
        assert_eq!(
            batch_sizes(2500).collect::<Vec<_>>(),
            vec![(0, 1000), (1, 1000), (2, 500)]
        );
        assert_eq!(batch_sizes(1000).count(), 1);
        assert_eq!(batch_sizes(1).collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn threading_does_not_change_results_test() {
        let (player, shoe) = player_and_shoe();
        let config = EstimatorConfig {
            trials: 4321,
            options: Options::empty(),
        };
        let estimator = Estimator::new(&player, Card::from_ident("8"), &shoe, config).unwrap();

        let single = run_batches(&estimator, &RunOptions::new(true, Some(99), None)).unwrap();
        let parallel = run_batches(&estimator, &RunOptions::new(false, Some(99), None)).unwrap();

        assert_eq!(single, parallel);
        assert_eq!(single.completed(), 4321);
    }

    #[test]
    fn expired_deadline_runs_nothing_test() {
        let (player, shoe) = player_and_shoe();
        let estimator =
            Estimator::new(&player, Card::ACE, &shoe, EstimatorConfig::default()).unwrap();

        let options = RunOptions {
            single_threaded: true,
            seed: 1,
            deadline: Some(Duration::ZERO),
        };
        let err = run_batches(&estimator, &options).unwrap_err();
        assert_eq!(err.to_string(), "deadline reached before any trial completed");
        assert!(err.downcast_ref::<blackjack_core::prelude::Error>().is_none());
    }
}
