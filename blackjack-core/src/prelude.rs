pub use crate::game::cards::{Card, CardView, Face, Hand, BLACKJACK, MAX_HAND_SIZE};
pub use crate::game::dealer::{Dealer, DealerState, DEALER_STANDS_AT};
pub use crate::game::error::{Error, Result};
pub use crate::game::estimator::{estimate, Estimator, EstimatorConfig, Options, Tally, DEFAULT_TRIALS};
pub use crate::game::outcome::Outcome;
pub use crate::game::shoe::{Shoe, DEFAULT_DECKS};
