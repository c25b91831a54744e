use super::card::Card;
use super::category::Category;
use super::evaluator::Evaluator;
use super::hand::Hand;

/// A hand's full strength: category first, then the five tiebreak values.
/// The derived order is exactly "beats".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strength {
    category: Category,
    tiebreak: [i8; crate::HAND],
}

impl Strength {
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn tiebreak(&self) -> [i8; crate::HAND] {
        self.tiebreak
    }
    pub fn rank(&self) -> u8 {
        u8::from(self.category)
    }
}

/// five cards evaluate directly. seven cards take the best of their 21 five-card subsets.
impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        match hand.size() {
            crate::HAND => {
                let eval = Evaluator::from(hand);
                Self {
                    category: eval.find_category(),
                    tiebreak: eval.find_tiebreak(),
                }
            }
            crate::SEVEN => {
                let cards = Vec::<Card>::from(hand);
                crate::CHOOSE
                    .iter()
                    .map(|&subset| subset.map(|i| cards[i]))
                    .map(|five| Hand::from(five.as_slice()))
                    .map(Strength::from)
                    .max()
                    .expect("21 subsets")
            }
            n => panic!("strength of {} cards", n),
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<14}{:?}", self.category, self.tiebreak)
    }
}
