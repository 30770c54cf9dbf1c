use thiserror::Error;

use crate::game::cards::Card;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("no more cards in the shoe")]
    EmptyShoe,
    #[error("card {0} is not in the shoe")]
    CardNotFound(Card),
    #[error("card rank must be between 1 and 10, got {0}")]
    InvalidRank(u8),
    #[error("unrecognized card symbol")]
    InvalidFace,
    #[error("a hand can have a maximum of {} cards", crate::game::cards::MAX_HAND_SIZE)]
    OverfullHand,
    #[error("an estimate needs at least one trial")]
    ZeroTrials,
}

pub type Result<T> = std::result::Result<T, Error>;
