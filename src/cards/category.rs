/// The ordinal category of a 5-card hand.
///
/// The discriminant is the hand's rank: it is the value the constraint
/// encoding assigns to the rank variable, and ordering by it is ordering by
/// poker strength before tiebreaks are consulted.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOAK = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOAK = 7,
    StraightFlush = 8,
}

impl Category {
    /// highest priority first, which is the order the classifier claims them in
    pub const fn priority() -> [Self; crate::CATEGORIES] {
        [
            Category::StraightFlush,
            Category::FourOAK,
            Category::FullHouse,
            Category::Flush,
            Category::Straight,
            Category::ThreeOAK,
            Category::TwoPair,
            Category::OnePair,
            Category::HighCard,
        ]
    }
}

/// u8 isomorphism
impl From<u8> for Category {
    fn from(n: u8) -> Self {
        match n {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::ThreeOAK,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOAK,
            8 => Category::StraightFlush,
            _ => panic!("invalid category u8: {}", n),
        }
    }
}
impl From<Category> for u8 {
    fn from(c: Category) -> u8 {
        c as u8
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Category::HighCard => write!(f, "HighCard"),
            Category::OnePair => write!(f, "OnePair"),
            Category::TwoPair => write!(f, "TwoPair"),
            Category::ThreeOAK => write!(f, "ThreeOfAKind"),
            Category::Straight => write!(f, "Straight"),
            Category::Flush => write!(f, "Flush"),
            Category::FullHouse => write!(f, "FullHouse"),
            Category::FourOAK => write!(f, "FourOfAKind"),
            Category::StraightFlush => write!(f, "StraightFlush"),
        }
    }
}
