use crate::game::cards::{Hand, BLACKJACK};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Push,
    Loss,
}

impl Outcome {
    /// Settle a finished player hand against a dealer that has stood.
    /// A busted player loses even when the dealer busts too.
    pub fn resolve(player: &Hand, dealer: &Hand) -> Self {
        let player_value = player.value();
        let dealer_value = dealer.value();

        if player_value > BLACKJACK {
            Self::Loss
        } else if dealer_value > BLACKJACK || player_value > dealer_value {
            Self::Win
        } else if player_value == dealer_value {
            Self::Push
        } else {
            Self::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand;

    fn expect(player: &Hand, dealer: &Hand, expected: Outcome) {
        assert_eq!(Outcome::resolve(player, dealer), expected);
    }

    #[test]
    fn resolve_test() {
        expect(&hand!("10 9"), &hand!("10 8"), Outcome::Win);
        expect(&hand!("10 9"), &hand!("10 6 K"), Outcome::Win);
        expect(&hand!("10 9"), &hand!("A 8"), Outcome::Push);
        expect(&hand!("10 7"), &hand!("10 8"), Outcome::Loss);
        // Player bust loses regardless of the dealer.
        expect(&hand!("10 7 5"), &hand!("10 6 K"), Outcome::Loss);
        // Values only; two-card 21 against three-card 21 is still a push.
        expect(&hand!("A K"), &hand!("7 7 7"), Outcome::Push);
    }
}
