use bitflags::bitflags;
use rand::Rng;
use tracing::{debug, warn};

use crate::game::cards::{Card, Hand};
use crate::game::dealer::Dealer;
use crate::game::error::{Error, Result};
use crate::game::outcome::Outcome;
use crate::game::shoe::Shoe;

pub const DEFAULT_TRIALS: usize = 5000;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Options: u32 {
        /// Drop trials that run out of cards instead of failing the estimate.
        const SkipFailedTrials = 0b0001;
        /// Reshuffle each trial's shoe after the hole card is drawn, so dealer
        /// hits are sampled too instead of following the snapshot's order.
        const ReshuffleHits    = 0b0010;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EstimatorConfig {
    pub trials: usize,
    pub options: Options,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            options: Options::empty(),
        }
    }
}

/// Outcome counts over a batch of trials. Tallies from separate batches
/// combine with `merge` in any order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub pushes: u64,
    pub losses: u64,
    pub skipped: u64,
}

#[allow(clippy::cast_precision_loss)]
impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            pushes: self.pushes + other.pushes,
            losses: self.losses + other.losses,
            skipped: self.skipped + other.skipped,
        }
    }

    /// Trials that reached a result. Skipped trials are not included.
    pub fn completed(&self) -> u64 {
        self.wins + self.pushes + self.losses
    }

    /// Fails with `EmptyShoe` when every trial was skipped.
    pub fn require_completed(self) -> Result<Self> {
        if self.completed() == 0 {
            Err(Error::EmptyShoe)
        } else {
            Ok(self)
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn push_rate(&self) -> f64 {
        self.rate(self.pushes)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    fn rate(&self, count: u64) -> f64 {
        match self.completed() {
            0 => 0.0,
            completed => count as f64 / completed as f64,
        }
    }
}

/// Monte Carlo estimate of how a fixed player hand fares against a dealer
/// showing `upcard`. The player is assumed to stand. Each trial draws the
/// hole card at random and the dealer then hits from the top of the shoe
/// in snapshot order.
///
/// The caller's shoe and hand are only borrowed. Every trial works on its
/// own copy of the shoe.
#[derive(Debug)]
pub struct Estimator<'a> {
    player: &'a Hand,
    upcard: Card,
    shoe: &'a Shoe,
    config: EstimatorConfig,
}

impl<'a> Estimator<'a> {
    /// `shoe` must still hold `upcard`: the snapshot counts the dealer's
    /// visible card as undealt, and each trial takes it out.
    pub fn new(
        player: &'a Hand,
        upcard: Card,
        shoe: &'a Shoe,
        config: EstimatorConfig,
    ) -> Result<Self> {
        if config.trials == 0 {
            return Err(Error::ZeroTrials);
        }
        if !shoe.contains(upcard) {
            return Err(Error::CardNotFound(upcard));
        }

        Ok(Self {
            player,
            upcard,
            shoe,
            config,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Run the configured number of trials.
    pub fn estimate(&self, rng: &mut impl Rng) -> Result<Tally> {
        debug!(
            player = %self.player,
            upcard = %self.upcard,
            shoe = self.shoe.len(),
            trials = self.config.trials,
            "estimating"
        );

        let tally = self.run_trials(self.config.trials, rng)?.require_completed()?;

        debug!(
            wins = tally.wins,
            pushes = tally.pushes,
            skipped = tally.skipped,
            win_rate = tally.win_rate(),
            push_rate = tally.push_rate(),
            "estimate finished"
        );

        Ok(tally)
    }

    /// Run a batch of `trials` independent trials. Batches may be run on
    /// separate threads and their tallies merged.
    pub fn run_trials(&self, trials: usize, rng: &mut impl Rng) -> Result<Tally> {
        let mut tally = Tally::default();

        for _ in 0..trials {
            match self.trial(rng) {
                Ok(outcome) => tally.record(outcome),
                Err(Error::EmptyShoe) if self.config.options.contains(Options::SkipFailedTrials) => {
                    warn!(shoe = self.shoe.len(), "trial ran out of cards, skipping");
                    tally.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(tally)
    }

    fn trial(&self, rng: &mut impl Rng) -> Result<Outcome> {
        let mut shoe = self.shoe.clone();
        shoe.remove_specific(self.upcard)?;

        let hole_card = shoe.draw_random(rng)?;
        if self.config.options.contains(Options::ReshuffleHits) {
            shoe.shuffle(rng);
        }

        let dealer = Dealer::new(self.upcard, hole_card)?.play_out(&mut shoe)?;
        Ok(Outcome::resolve(self.player, &dealer))
    }
}

/// Estimate `(win_rate, push_rate)` for `player` standing against `upcard`
/// over `trials` trials, failing on the first trial that runs out of cards.
pub fn estimate(
    player: &Hand,
    upcard: Card,
    shoe: &Shoe,
    trials: usize,
    rng: &mut impl Rng,
) -> Result<(f64, f64)> {
    let config = EstimatorConfig {
        trials,
        options: Options::empty(),
    };
    let tally = Estimator::new(player, upcard, shoe, config)?.estimate(rng)?;
    Ok((tally.win_rate(), tally.push_rate()))
}
