use super::suit::Suit;
use super::value::Value;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    suit: Suit,
    value: Value,
}

impl Card {
    pub fn new(suit: Suit, value: Value) -> Self {
        Self { suit, value }
    }
    pub fn value(&self) -> Value {
        self.value
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// id -> (suit, value)
    pub fn decode(id: u8) -> (u8, u8) {
        assert!((id as usize) < crate::DECK, "invalid card id: {}", id);
        (id / crate::VALUES as u8, id % crate::VALUES as u8)
    }
    /// (suit, value) -> id
    pub fn encode(suit: u8, value: u8) -> u8 {
        assert!((suit as usize) < crate::SUITS, "invalid suit: {}", suit);
        assert!((value as usize) < crate::VALUES, "invalid value: {}", value);
        suit * crate::VALUES as u8 + value
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..crate::DECK as u8).map(Card::from)
    }
}

/// u8 isomorphism
/// each card is mapped to suit-major order 0-51
/// 10h
/// 2 * 13 + 8 = 34
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        Card::encode(u8::from(c.suit), u8::from(c.value))
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        let (suit, value) = Card::decode(n);
        Self {
            suit: Suit::from(suit),
            value: Value::from(value),
        }
    }
}

/// i64 projection
/// solver assignments come back as i64
impl TryFrom<i64> for Card {
    type Error = anyhow::Error;
    fn try_from(n: i64) -> std::result::Result<Self, Self::Error> {
        anyhow::ensure!(
            (0..crate::DECK as i64).contains(&n),
            "card id out of range: {}",
            n
        );
        Ok(Card::from(n as u8))
    }
}

/// u64 isomorphism
/// each card is just one bit turned on
/// 10h
/// xxxxxxxxxxxx 0000000000000000010000000000000000000000000000000000
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self::from(n.trailing_zeros() as u8)
    }
}

/// str isomorphism
/// value followed by suit: "10h", "Th", "As"
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        let (last, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| anyhow::anyhow!("empty card str"))?;
        let (value, suit) = s.split_at(last);
        Ok(Self {
            suit: Suit::try_from(suit)?,
            value: Value::try_from(value)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.value, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for id in 0..crate::DECK as u8 {
            assert_eq!(id, u8::from(Card::from(id)));
        }
    }

    #[test]
    fn codec_round_trip() {
        for id in 0..crate::DECK as u8 {
            let (suit, value) = Card::decode(id);
            assert_eq!(Card::encode(suit, value), id);
        }
    }

    #[test]
    fn suit_major_layout() {
        assert_eq!(Card::decode(0), (0, 0));
        assert_eq!(Card::decode(12), (0, 12));
        assert_eq!(Card::decode(13), (1, 0));
        assert_eq!(Card::decode(51), (3, 12));
    }

    #[test]
    fn display_strings() {
        assert_eq!(Card::from(0u8).to_string(), "2c");
        assert_eq!(Card::from(8u8).to_string(), "10c");
        assert_eq!(Card::from(25u8).to_string(), "Ad");
        assert_eq!(Card::from(34u8).to_string(), "10h");
        assert_eq!(Card::from(48u8).to_string(), "Js");
        assert_eq!(Card::from(51u8).to_string(), "As");
    }

    #[test]
    fn bijective_str() {
        for card in Card::all() {
            let s = card.to_string();
            assert_eq!(card, Card::try_from(s.as_str()).unwrap());
        }
        assert_eq!(Card::try_from("Th").unwrap(), Card::try_from("10h").unwrap());
        assert!(Card::try_from("1h").is_err());
        assert!(Card::try_from("Ax").is_err());
        assert!(Card::try_from("A").is_err());
    }

    #[test]
    fn bijective_u64() {
        let card = Card::try_from("Qd").unwrap();
        assert_eq!(card, Card::from(u64::from(card)));
    }

    #[test]
    fn i64_range() {
        assert_eq!(Card::try_from(51i64).unwrap(), Card::from(51u8));
        assert!(Card::try_from(52i64).is_err());
        assert!(Card::try_from(-1i64).is_err());
    }
}
