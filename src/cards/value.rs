/// Face value of a card, ace high.
///
/// Named "value" rather than "rank" because rank is reserved for the
/// ordinal category of a whole 5-card hand.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Value {
    #[default]
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Value {
    pub const MAX: Self = Value::Ace;
    pub const MIN: Self = Value::Two;

    const fn mask() -> u16 {
        0b1111111111111
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..crate::VALUES as u8).map(Value::from)
    }
}

/// u8 isomorphism
impl From<u8> for Value {
    fn from(n: u8) -> Value {
        match n {
            0 => Value::Two,
            1 => Value::Three,
            2 => Value::Four,
            3 => Value::Five,
            4 => Value::Six,
            5 => Value::Seven,
            6 => Value::Eight,
            7 => Value::Nine,
            8 => Value::Ten,
            9 => Value::Jack,
            10 => Value::Queen,
            11 => Value::King,
            12 => Value::Ace,
            _ => panic!("invalid value u8: {}", n),
        }
    }
}
impl From<Value> for u8 {
    fn from(v: Value) -> u8 {
        v as u8
    }
}

/// u16 isomorphism
///
/// With 13 values we only need 13 bits. Going back we keep the highest set bit.
impl From<u16> for Value {
    fn from(n: u16) -> Value {
        let msb = (16 - 1 - (n & Self::mask()).leading_zeros()) as u8;
        Value::from(msb)
    }
}
impl From<Value> for u16 {
    fn from(v: Value) -> u16 {
        1 << u8::from(v)
    }
}

/// str isomorphism
/// "T" is accepted as an alias of "10"
impl TryFrom<&str> for Value {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "2" => Ok(Value::Two),
            "3" => Ok(Value::Three),
            "4" => Ok(Value::Four),
            "5" => Ok(Value::Five),
            "6" => Ok(Value::Six),
            "7" => Ok(Value::Seven),
            "8" => Ok(Value::Eight),
            "9" => Ok(Value::Nine),
            "10" | "T" | "t" => Ok(Value::Ten),
            "J" | "j" => Ok(Value::Jack),
            "Q" | "q" => Ok(Value::Queen),
            "K" | "k" => Ok(Value::King),
            "A" | "a" => Ok(Value::Ace),
            _ => Err(anyhow::anyhow!("invalid value str: {}", s)),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Value::Two => "2",
                Value::Three => "3",
                Value::Four => "4",
                Value::Five => "5",
                Value::Six => "6",
                Value::Seven => "7",
                Value::Eight => "8",
                Value::Nine => "9",
                Value::Ten => "10",
                Value::Jack => "J",
                Value::Queen => "Q",
                Value::King => "K",
                Value::Ace => "A",
            }
        )
    }
}
