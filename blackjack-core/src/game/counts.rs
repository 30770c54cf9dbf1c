use static_assertions::const_assert;

use super::cards::{Card, CardView};
use crate::game::error::{Error, Result};

const RANKS: usize = 10;

const_assert!(Card::ACE.rank() == 1);
const_assert!(Card::TEN.rank() as usize == RANKS);

/// Multiplicity of each rank, indexed by `rank - 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RankCounts([u32; RANKS]);

impl RankCounts {
    pub fn empty() -> Self {
        Self([0; RANKS])
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|count| *count as usize).sum()
    }

    pub fn count(&self, card: Card) -> usize {
        self.0[Self::get_index(card)] as usize
    }

    pub fn contains(&self, card: Card) -> bool {
        self.count(card) > 0
    }

    pub fn insert(&mut self, card: Card) {
        self.0[Self::get_index(card)] += 1;
    }

    pub fn remove(&mut self, card: Card) -> Result<()> {
        let slot = &mut self.0[Self::get_index(card)];
        *slot = slot.checked_sub(1).ok_or(Error::CardNotFound(card))?;
        Ok(())
    }

    #[inline]
    fn get_index(card: Card) -> usize {
        usize::from(card.rank() - 1)
    }
}

impl<V: CardView> From<&V> for RankCounts {
    fn from(value: &V) -> Self {
        let mut counts = Self::empty();
        for card in value.view() {
            counts.insert(*card);
        }
        counts
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{card, hand};

    #[test]
    fn counting_test() {
        let mut counts = RankCounts::from(&hand!("K Q 5 A 10"));

        assert_eq!(counts.total(), 5);
        assert_eq!(counts.count(Card::TEN), 3);
        assert_eq!(counts.count(card!("5")), 1);
        assert!(!counts.contains(card!("9")));

        counts.remove(Card::TEN).unwrap();
        assert_eq!(counts.count(Card::TEN), 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn remove_missing_test() {
        let mut counts = RankCounts::empty();
        assert_eq!(counts.remove(Card::ACE), Err(Error::CardNotFound(Card::ACE)));
        assert_eq!(counts, RankCounts::empty());
    }
}
