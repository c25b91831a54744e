use super::card::Card;
use super::suit::Suit;
use super::value::Value;

/// Hand represents an unordered set of Cards, stored as the LSB 52 bits of a u64.
/// Bit `suit * 13 + value` is set when the card is present, so each suit
/// occupies a contiguous block of 13 bits.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hand(u64);

impl Hand {
    pub fn add(lhs: Self, rhs: Self) -> Self {
        assert!(u64::from(lhs) & u64::from(rhs) == 0);
        Self(lhs.0 | rhs.0)
    }

    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    /// the cards of a single suit, still in Hand coordinates
    pub fn of(&self, suit: &Suit) -> Hand {
        Self(self.0 & u64::from(*suit))
    }
    /// how many cards of this value the hand holds
    pub fn of_value(&self, value: &Value) -> usize {
        Suit::all()
            .iter()
            .map(|s| u8::from(*s) as usize * crate::VALUES + u8::from(*value) as usize)
            .filter(|bit| self.0 & (1 << bit) != 0)
            .count()
    }

    pub fn remove(&mut self, card: Card) {
        let card = u8::from(card);
        let mask = !(1 << card);
        self.0 &= mask;
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// we can empty a hand from low to high
/// by removing the lowest card until the hand is empty
impl Iterator for Hand {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.size() == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
/// [2c, 10h, As]
/// xxxxxxxxxxxx 1000000000000000000000100000000000000000000000000001
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<Hand> for u64 {
    fn from(h: Hand) -> Self {
        h.0
    }
}

/// Vec<Card> isomorphism (up to Vec permutation, this always comes out sorted)
impl From<Hand> for Vec<Card> {
    fn from(h: Hand) -> Self {
        h.collect()
    }
}
impl From<&[Card]> for Hand {
    fn from(cards: &[Card]) -> Self {
        Self(
            cards
                .iter()
                .map(|c| u64::from(*c))
                .fold(0u64, |a, b| a | b),
        )
    }
}

/// one-way conversion to u16 Value masks
/// the four 13-bit suit blocks are folded onto each other
impl From<Hand> for u16 {
    fn from(h: Hand) -> Self {
        let x = u64::from(h);
        let y = (x | x >> 13 | x >> 26 | x >> 39) & 0x1FFF;
        y as u16
    }
}

/// str isomorphism
/// whitespace separated cards
impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = s
            .split_whitespace()
            .map(Card::try_from)
            .collect::<anyhow::Result<Vec<Card>>>()?;
        let hand = Hand::from(cards.as_slice());
        anyhow::ensure!(hand.size() == cards.len(), "duplicate cards in {:?}", s);
        Ok(hand)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = Vec::<Card>::from(*self)
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", cards.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u64() {
        let hand = Hand::try_from("2c 10h As").unwrap();
        assert_eq!(hand, Hand::from(u64::from(hand)));
        assert_eq!(u64::from(hand), 1u64 | 1 << 34 | 1 << 51);
    }

    #[test]
    fn card_iteration() {
        let mut iter = Hand::try_from("Jc 10s 2c Js").unwrap().into_iter();
        assert_eq!(iter.next(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Jc").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("10s").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Js").unwrap()));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn values_in_suit() {
        let hand = Hand::try_from("2c 3d 4h 5s 6c 7d 8h 9s 10c Jd Qh Ks Ac").unwrap();
        assert_eq!(u16::from(hand.of(&Suit::Club)), 0b_1000100010001);
        assert_eq!(u16::from(hand.of(&Suit::Diamond)), 0b_0001000100010);
        assert_eq!(u16::from(hand.of(&Suit::Heart)), 0b_0010001000100);
        assert_eq!(u16::from(hand.of(&Suit::Spade)), 0b_0100010001000);
    }

    #[test]
    fn value_counts() {
        let hand = Hand::try_from("Ac Ad Ah 2c 3c").unwrap();
        assert_eq!(hand.of_value(&Value::Ace), 3);
        assert_eq!(hand.of_value(&Value::Two), 1);
        assert_eq!(hand.of_value(&Value::King), 0);
    }

    #[test]
    fn rejects_duplicates() {
        assert!(Hand::try_from("Ac Ac").is_err());
    }
}
