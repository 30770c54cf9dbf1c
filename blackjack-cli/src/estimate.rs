use anyhow::{Context, Result};
use clap::Args;
use rand::prelude::*;

use blackjack_core::prelude::{
    Card, Estimator, EstimatorConfig, Hand, Options, Shoe, Tally, DEFAULT_DECKS, DEFAULT_TRIALS,
};

use crate::driver::{self, RunOptions};

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// The player's cards (A, 2-10, J, Q, K)
    #[arg(short = 'p', long = "player", num_args = 1.., required = true)]
    player: Vec<Card>,

    /// The dealer's face-up card
    #[arg(short = 'u', long = "upcard")]
    upcard: Card,

    /// Number of 52-card decks shuffled into the shoe
    #[arg(short = 'd', long = "decks", default_value_t = DEFAULT_DECKS)]
    decks: usize,

    /// Deal from every deck instead of keeping only half the shoe
    #[arg(long = "full-shoe", default_value = "false")]
    full_shoe: bool,

    /// Number of simulated dealer hands
    #[arg(short = 'i', long = "trials", default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for the shoe shuffle and every trial batch
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Skip trials that run out of cards instead of failing
    #[arg(long = "lenient", default_value = "false")]
    lenient: bool,

    /// Reshuffle the shoe before each trial's dealer hits
    #[arg(long = "reshuffle", default_value = "false")]
    reshuffle: bool,

    /// Run on a single thread (for profiling)
    #[arg(long = "single-threaded", default_value = "false")]
    single_threaded: bool,

    /// Stop starting new trial batches after this many milliseconds
    #[arg(long = "deadline-ms")]
    deadline_ms: Option<u64>,
}

impl EstimateArgs {
    fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.lenient {
            options |= Options::SkipFailedTrials;
        }
        if self.reshuffle {
            options |= Options::ReshuffleHits;
        }
        options
    }
}

/// Build the round's shoe and take the player's cards out of it, as if they
/// had been dealt.
fn deal_shoe(args: &EstimateArgs, rng: &mut impl Rng) -> Result<(Hand, Shoe)> {
    let mut shoe = if args.full_shoe {
        Shoe::shuffled(args.decks, rng)
    } else {
        Shoe::for_round(args.decks, rng)
    };

    let player = Hand::from_slice(&args.player)?;
    for card in &args.player {
        shoe.remove_specific(*card)
            .with_context(|| format!("dealing {card} to the player"))?;
    }

    Ok((player, shoe))
}

fn print_estimate(player: &Hand, upcard: Card, tally: &Tally) {
    println!("Your hand: {player} (Value: {})", player.value());
    println!("Dealer upcard: {upcard}");
    println!(
        "Estimated win rate: {:.2}, push rate: {:.2}",
        tally.win_rate(),
        tally.push_rate()
    );
    if tally.skipped > 0 {
        println!(
            "({} of {} trials ran out of cards and were skipped)",
            tally.skipped,
            tally.completed() + tally.skipped
        );
    }
}

pub fn run(args: &EstimateArgs) -> Result<()> {
    let run = RunOptions::new(args.single_threaded, args.seed, args.deadline_ms);
    let mut rng = SmallRng::seed_from_u64(run.seed);

    let (player, shoe) = deal_shoe(args, &mut rng)?;
    let config = EstimatorConfig {
        trials: args.trials,
        options: args.options(),
    };
    let estimator = Estimator::new(&player, args.upcard, &shoe, config)
        .with_context(|| format!("dealer upcard {} against a shoe of {}", args.upcard, shoe.len()))?;

    let tally = driver::run_batches(&estimator, &run)?;
    print_estimate(&player, args.upcard, &tally);

    Ok(())
}
