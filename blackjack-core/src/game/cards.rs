use std::fmt;
use std::str::FromStr;

use heapless;
use itertools::Itertools;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::game::error::{Error, Result};

/// Twenty-one aces plus the card that finally busts them.
pub const MAX_HAND_SIZE: usize = 22;

pub const BLACKJACK: u32 = 21;

/// A card as it matters for scoring. Faces collapse onto rank 10 and the
/// ace is rank 1.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub const ACE: Self = Self(1);
    pub const TEN: Self = Self(10);

    pub fn new(rank: u8) -> Result<Self> {
        if (1..=10).contains(&rank) {
            Ok(Self(rank))
        } else {
            Err(Error::InvalidRank(rank))
        }
    }

    pub const fn rank(self) -> u8 {
        self.0
    }

    pub fn is_ace(self) -> bool {
        self == Self::ACE
    }

    /// Value with aces counted high.
    pub fn soft_value(self) -> u32 {
        if self.is_ace() {
            11
        } else {
            u32::from(self.0)
        }
    }

    /// Convert a shorthand identifier into a card. Panics if the identifier
    /// is incorrect. This exists only for test-writing.
    ///
    /// ```
    /// # use blackjack_core::prelude::Card;
    /// assert_eq!(Card::from_ident("K"), Card::TEN);
    /// assert_eq!(Card::from_ident("a"), Card::ACE);
    /// ```
    pub fn from_ident(ident: &str) -> Self {
        ident.parse().unwrap()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ace() {
            f.pad("A")
        } else {
            f.pad(&self.0.to_string())
        }
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Face>().map(Self::from)
    }
}

#[macro_export]
macro_rules! card {
    ($ident:literal) => {
        $crate::game::cards::Card::from_ident($ident)
    };
}

/// The printed face of a card. Only display and parsing care about the
/// difference between a ten and a king.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
#[repr(u8)]
pub enum Face {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Face {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

impl From<Face> for Card {
    fn from(face: Face) -> Self {
        Self((face as u8).min(10))
    }
}

impl FromStr for Face {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let face = match s.trim().to_ascii_uppercase().as_str() {
            "A" | "1" => Self::Ace,
            "2" => Self::Two,
            "3" => Self::Three,
            "4" => Self::Four,
            "5" => Self::Five,
            "6" => Self::Six,
            "7" => Self::Seven,
            "8" => Self::Eight,
            "9" => Self::Nine,
            "10" | "T" => Self::Ten,
            "J" => Self::Jack,
            "Q" => Self::Queen,
            "K" => Self::King,
            _ => return Err(Error::InvalidFace),
        };
        Ok(face)
    }
}

pub trait CardView {
    fn view(&self) -> &[Card];
}

lazy_static! {
    pub(crate) static ref SINGLE_DECK: Vec<Card> = {
        let mut cards = Vec::with_capacity(52);
        for _ in 0..4 {
            cards.extend(Face::iter().map(Card::from));
        }
        cards
    };
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    cards: heapless::Vec<Card, MAX_HAND_SIZE>,
}

impl Hand {
    pub fn empty() -> Self {
        Self {
            cards: heapless::Vec::new(),
        }
    }

    /// A hand holds at most [`MAX_HAND_SIZE`] cards. Longer slices fail with
    /// [`Error::OverfullHand`].
    ///
    /// ```
    /// # use blackjack_core::prelude::{Card, Error, Hand, MAX_HAND_SIZE};
    /// assert!(Hand::from_slice(&[Card::ACE; MAX_HAND_SIZE]).is_ok());
    /// assert_eq!(
    ///     Hand::from_slice(&[Card::ACE; MAX_HAND_SIZE + 1]),
    ///     Err(Error::OverfullHand)
    /// );
    /// ```
    pub fn from_slice(cards: &[Card]) -> Result<Self> {
        Ok(Self {
            cards: heapless::Vec::from_slice(cards).map_err(|()| Error::OverfullHand)?,
        })
    }

    /// Convert a series of shorthand identifiers into a `Hand`.
    /// Panics if the input is incorrect. This exists only for test-writing.
    ///
    /// ```
    /// # use blackjack_core::prelude::Hand;
    /// let hand = Hand::from_idents("A A 9");
    /// assert_eq!(hand.len(), 3);
    /// assert_eq!(hand.value(), 21);
    /// ```
    pub fn from_idents(idents: &str) -> Self {
        let cards = idents
            .split_ascii_whitespace()
            .map(Card::from_ident)
            .collect::<Vec<_>>();
        Self::from_slice(&cards).unwrap()
    }

    pub fn push(&mut self, card: Card) -> Result<()> {
        self.cards.push(card).map_err(|_| Error::OverfullHand)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Best total at or under 21 if one exists, otherwise the smallest bust
    /// total. Aces are downgraded from 11 to 1 only as far as needed.
    pub fn value(&self) -> u32 {
        self.best_total().0
    }

    /// Whether the best total still counts an ace as 11.
    pub fn is_soft(&self) -> bool {
        self.best_total().1 > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    pub fn is_blackjack(&self) -> bool {
        self.len() == 2 && self.value() == BLACKJACK
    }

    fn best_total(&self) -> (u32, usize) {
        let mut total: u32 = self.cards.iter().map(|card| card.soft_value()).sum();
        let mut soft_aces = self.cards.iter().filter(|card| card.is_ace()).count();

        while total > BLACKJACK && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }

        (total, soft_aces)
    }
}

#[macro_export]
macro_rules! hand {
    ($ident:literal) => {
        $crate::game::cards::Hand::from_idents($ident)
    };
}

impl CardView for Hand {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.cards.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_deck_test() {
        assert_eq!(SINGLE_DECK.len(), 52);

        let counts = SINGLE_DECK.iter().counts();
        assert_eq!(counts[&Card::ACE], 4);
        assert_eq!(counts[&Card::TEN], 16);
        for rank in 2..=9 {
            assert_eq!(counts[&Card::new(rank).unwrap()], 4);
        }
    }

    #[test]
    fn rank_bounds_test() {
        assert_eq!(Card::new(0), Err(Error::InvalidRank(0)));
        assert_eq!(Card::new(11), Err(Error::InvalidRank(11)));
        assert_eq!(Card::new(1), Ok(Card::ACE));
    }

    #[test]
    fn face_parsing_test() {
        assert_eq!(card!("J"), Card::TEN);
        assert_eq!(card!("q"), Card::TEN);
        assert_eq!(card!("T"), Card::TEN);
        assert_eq!(card!("10"), Card::TEN);
        assert_eq!(card!("7").rank(), 7);
        assert_eq!("Z".parse::<Card>(), Err(Error::InvalidFace));
        assert_eq!("11".parse::<Face>(), Err(Error::InvalidFace));
        assert_eq!("k".parse::<Face>(), Ok(Face::King));
        assert_eq!(Face::Queen.symbol(), "Q");
    }

    #[test]
    fn display_test() {
        assert_eq!(card!("A").to_string(), "A");
        assert_eq!(card!("K").to_string(), "10");
        assert_eq!(format!("{:>3}", Card::ACE), "  A");
        assert_eq!(hand!("A 5 Q").to_string(), "[A 5 10]");
    }

    #[test]
    fn empty_hand_test() {
        let hand = Hand::empty();
        assert_eq!(hand.value(), 0);
        assert!(!hand.is_soft());
        assert!(!hand.is_bust());
    }

    #[test]
    fn hard_total_test() {
        assert_eq!(hand!("10 9").value(), 19);
        assert_eq!(hand!("2 3 4 5").value(), 14);
        assert_eq!(hand!("K Q 5").value(), 25);
        assert!(hand!("K Q 5").is_bust());
    }

    #[test]
    fn hard_total_ignores_order_test() {
        let hand = hand!("2 3 7 9 K");
        let expected = hand.view().iter().map(|card| u32::from(card.rank())).sum::<u32>();
        for order in hand.view().iter().copied().permutations(hand.len()) {
            assert_eq!(Hand::from_slice(&order).unwrap().value(), expected);
        }
    }

    #[test]
    fn ace_downgrade_test() {
        assert_eq!(hand!("A A 9").value(), 21);
        assert_eq!(hand!("A A").value(), 12);
        assert_eq!(hand!("A 6").value(), 17);
        assert!(hand!("A 6").is_soft());
        assert_eq!(hand!("A 6 10").value(), 17);
        assert!(!hand!("A 6 10").is_soft());
        assert_eq!(hand!("A A A A 10 10").value(), 24);
    }

    #[test]
    fn blackjack_test() {
        assert!(hand!("A K").is_blackjack());
        assert!(!hand!("7 7 7").is_blackjack());
        assert!(!hand!("10 9").is_blackjack());
    }

    #[test]
    fn overfull_hand_test() {
        assert_eq!(MAX_HAND_SIZE, 22);
        let mut hand = Hand::empty();
        for _ in 0..MAX_HAND_SIZE {
            hand.push(Card::ACE).unwrap();
        }
        assert_eq!(hand.push(Card::ACE), Err(Error::OverfullHand));
        assert_eq!(hand.value(), 12);
        assert_eq!(Hand::from_slice(&[Card::ACE; MAX_HAND_SIZE]).map(|hand| hand.len()), Ok(22));
        assert_eq!(
            Hand::from_slice(&[Card::ACE; MAX_HAND_SIZE + 1]),
            Err(Error::OverfullHand)
        );
    }
}
