use anyhow::{Context, Result};
use clap::Subcommand;
use itertools::Itertools;
use rand::prelude::*;
use strum::IntoEnumIterator;

use blackjack_core::prelude::{
    Card, CardView, Estimator, EstimatorConfig, Face, Hand, Options, Shoe, BLACKJACK, DEFAULT_DECKS,
    DEFAULT_TRIALS,
};

use crate::driver::{self, RunOptions};

const LOWEST_TOTAL: u8 = 12;

#[derive(Debug, Subcommand)]
pub enum CliCommands {
    /// Win rate of standing on each hard total from 12 to 21 against every dealer upcard
    Table {
        /// Run on a single thread (for profiling)
        #[arg(long = "single-threaded", default_value = "false")]
        single_threaded: bool,

        /// Simulated dealer hands per table cell
        #[arg(short = 'i', long = "trials", default_value_t = DEFAULT_TRIALS)]
        trials: usize,

        /// Number of 52-card decks in the shoe
        #[arg(short = 'd', long = "decks", default_value_t = DEFAULT_DECKS)]
        decks: usize,

        /// Seed for the shoe shuffle and every trial batch
        #[arg(long = "seed")]
        seed: Option<u64>,

        /// Show push rates instead of win rates
        #[arg(long = "pushes", default_value = "false")]
        pushes: bool,
    },
}

/// Upcards in table order: 2 through 10, then the ace.
fn upcards() -> Vec<Card> {
    let mut cards = Face::iter().map(Card::from).dedup().collect::<Vec<_>>();
    cards.rotate_left(1);
    cards
}

/// A hard hand for `total`: a ten and one small card, or a ten and two
/// small cards for 21 so it isn't a blackjack.
fn hard_hand(total: u8) -> Result<Hand> {
    let cards = if u32::from(total) == BLACKJACK {
        vec![Card::TEN, Card::new(5)?, Card::new(6)?]
    } else {
        vec![Card::TEN, Card::new(total - 10)?]
    };
    Ok(Hand::from_slice(&cards)?)
}

fn stand_table(run: &RunOptions, trials: usize, decks: usize, pushes: bool) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(run.seed);
    let full_shoe = Shoe::shuffled(decks, &mut rng);
    let upcards = upcards();

    println!(
        "Standing {} rates over {trials} trials per cell from {decks} decks:",
        if pushes { "push" } else { "win" }
    );
    println!(
        "      {}",
        upcards.iter().map(|card| format!("{card:>5}")).join(" ")
    );

    for total in (LOWEST_TOTAL..=21).rev() {
        let player = hard_hand(total)?;
        let mut shoe = full_shoe.clone();
        for card in player.view() {
            shoe.remove_specific(*card)?;
        }

        let row = upcards
            .iter()
            .map(|upcard| -> Result<f64> {
                let config = EstimatorConfig {
                    trials,
                    options: Options::empty(),
                };
                let estimator = Estimator::new(&player, *upcard, &shoe, config)?;
                let tally = driver::run_batches(&estimator, run)
                    .with_context(|| format!("standing on {total} against {upcard}"))?;
                Ok(if pushes {
                    tally.push_rate()
                } else {
                    tally.win_rate()
                })
            })
            .collect::<Result<Vec<_>>>()?;

        println!(
            " {total:>4} {}",
            row.iter().map(|rate| format!("{rate:>5.3}")).join(" ")
        );
    }

    Ok(())
}

pub fn run(command: &CliCommands) -> Result<()> {
    match command {
        CliCommands::Table {
            single_threaded,
            trials,
            decks,
            seed,
            pushes,
        } => stand_table(
            &RunOptions::new(*single_threaded, *seed, None),
            *trials,
            *decks,
            *pushes,
        ),
    }
}
