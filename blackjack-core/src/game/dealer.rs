use tracing::trace;

use crate::game::cards::{Card, CardView, Hand};
use crate::game::error::Result;
use crate::game::shoe::Shoe;

/// The dealer draws to anything below this and stands on everything else,
/// soft totals included.
pub const DEALER_STANDS_AT: u32 = 17;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum DealerState {
    Playing,
    Standing,
}

/// A dealer hand being played out by the house rule. A busted dealer is
/// still `Standing`; deciding who won happens elsewhere.
#[derive(Clone, Debug)]
pub struct Dealer {
    hand: Hand,
    state: DealerState,
}

impl Dealer {
    pub fn new(upcard: Card, hole_card: Card) -> Result<Self> {
        Ok(Self::from_hand(Hand::from_slice(&[upcard, hole_card])?))
    }

    pub fn from_hand(hand: Hand) -> Self {
        let state = Self::state_for(&hand);
        Self { hand, state }
    }

    pub fn state(&self) -> DealerState {
        self.state
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn into_hand(self) -> Hand {
        self.hand
    }

    /// Take at most one card from the top of the shoe.
    pub fn step(&mut self, shoe: &mut Shoe) -> Result<DealerState> {
        if self.state == DealerState::Standing {
            return Ok(self.state);
        }

        let card = shoe.draw_top()?;
        self.hand.push(card)?;
        self.state = Self::state_for(&self.hand);

        trace!(
            card = %card,
            value = self.hand.value(),
            cards = self.hand.view().len(),
            "dealer hits"
        );

        Ok(self.state)
    }

    /// Draw until the dealer stands. Running out of cards part way through
    /// leaves the shoe partially consumed and returns `EmptyShoe`.
    pub fn play_out(mut self, shoe: &mut Shoe) -> Result<Hand> {
        while self.step(shoe)? == DealerState::Playing {}
        Ok(self.hand)
    }

    fn state_for(hand: &Hand) -> DealerState {
        if hand.value() < DEALER_STANDS_AT {
            DealerState::Playing
        } else {
            DealerState::Standing
        }
    }
}
