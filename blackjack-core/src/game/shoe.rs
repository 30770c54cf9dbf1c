use rand::prelude::{Rng, SliceRandom};

use crate::game::cards::{Card, CardView, SINGLE_DECK};
use crate::game::counts::RankCounts;
use crate::game::error::{Error, Result};

pub const DEFAULT_DECKS: usize = 8;

/// The undealt cards of a round. The end of `cards` is the top of the shoe;
/// `counts` always mirrors the multiplicities in `cards`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
    counts: RankCounts,
}

impl Shoe {
    /// Build a shoe that deals `cards` from the back forwards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut counts = RankCounts::empty();
        for card in &cards {
            counts.insert(*card);
        }
        Self { cards, counts }
    }

    /// `decks` standard 52-card decks in a fixed order.
    pub fn standard(decks: usize) -> Self {
        let mut cards = Vec::with_capacity(decks * SINGLE_DECK.len());
        for _ in 0..decks {
            cards.extend_from_slice(&SINGLE_DECK);
        }
        Self::from_cards(cards)
    }

    pub fn shuffled(decks: usize, rng: &mut impl Rng) -> Self {
        let mut shoe = Self::standard(decks);
        shoe.shuffle(rng);
        shoe
    }

    /// The shoe a round is dealt from: `decks` decks shuffled together, of
    /// which only the first half is kept.
    ///
    /// ```
    /// # use blackjack_core::prelude::Shoe;
    /// # use rand::{rngs::SmallRng, SeedableRng};
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let shoe = Shoe::for_round(8, &mut rng);
    /// assert_eq!(shoe.len(), 208);
    /// ```
    pub fn for_round(decks: usize, rng: &mut impl Rng) -> Self {
        let mut cards = Self::shuffled(decks, rng).cards;
        cards.truncate(cards.len() / 2);
        Self::from_cards(cards)
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count_of(&self, card: Card) -> usize {
        self.counts.count(card)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.counts.contains(card)
    }

    pub fn peek_top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Deal the next card in shoe order.
    pub fn draw_top(&mut self) -> Result<Card> {
        let card = self.cards.pop().ok_or(Error::EmptyShoe)?;
        self.counts.remove(card)?;
        Ok(card)
    }

    /// Take one card uniformly at random, so each rank comes out in
    /// proportion to how many copies are left. The order of the remaining
    /// cards is kept.
    pub fn draw_random(&mut self, rng: &mut impl Rng) -> Result<Card> {
        if self.is_empty() {
            return Err(Error::EmptyShoe);
        }
        let card = self.cards.remove(rng.gen_range(0..self.cards.len()));
        self.counts.remove(card)?;
        Ok(card)
    }

    /// Remove the copy of `card` nearest the top.
    pub fn remove_specific(&mut self, card: Card) -> Result<()> {
        let index = self
            .cards
            .iter()
            .rposition(|candidate| *candidate == card)
            .ok_or(Error::CardNotFound(card))?;
        self.counts.remove(card)?;
        self.cards.remove(index);
        Ok(())
    }

    /// Put a card back under the shoe, leaving the next deal unchanged.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert(0, card);
        self.counts.insert(card);
    }
}

impl CardView for Shoe {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}
