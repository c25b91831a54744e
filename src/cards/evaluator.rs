use super::category::Category;
use super::hand::Hand;
use super::suit::Suit;
use super::value::Value;

const WHEEL: u16 = 0b_1000000001111;

/// A direct evaluator for exactly five cards.
///
/// Categories are found with bitwise operations on the Hand, trying the
/// strongest first. Tiebreaks are the five values ordered by multiplicity
/// and then by value, with the ace playing low in the wheel.
pub struct Evaluator(Hand);
impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        assert!(h.size() == crate::HAND, "evaluator takes 5 cards: {}", h);
        Self(h)
    }
}

impl Evaluator {
    pub fn find_category(&self) -> Category {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .unwrap_or(Category::HighCard)
    }

    pub fn find_tiebreak(&self) -> [i8; crate::HAND] {
        if self.is_wheel() {
            return [3, 2, 1, 0, -1];
        }
        let counts = self.counts();
        let mut values = self.0.map(|c| c.value()).collect::<Vec<Value>>();
        values.sort_by_key(|v| std::cmp::Reverse((counts[u8::from(*v) as usize], *v)));
        let mut tiebreak = [0i8; crate::HAND];
        tiebreak
            .iter_mut()
            .zip(values)
            .for_each(|(t, v)| *t = u8::from(v) as i8);
        tiebreak
    }

    fn find_straight_flush(&self) -> Option<Category> {
        (self.is_flush() && self.is_straight()).then_some(Category::StraightFlush)
    }
    fn find_4_oak(&self) -> Option<Category> {
        (self.n_oak(4) > 0).then_some(Category::FourOAK)
    }
    fn find_3_oak_2_oak(&self) -> Option<Category> {
        (self.n_oak(3) > 0 && self.n_oak(2) == 1).then_some(Category::FullHouse)
    }
    fn find_flush(&self) -> Option<Category> {
        self.is_flush().then_some(Category::Flush)
    }
    fn find_straight(&self) -> Option<Category> {
        self.is_straight().then_some(Category::Straight)
    }
    fn find_3_oak(&self) -> Option<Category> {
        (self.n_oak(3) > 0).then_some(Category::ThreeOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Category> {
        (self.n_oak(2) == 2).then_some(Category::TwoPair)
    }
    fn find_2_oak(&self) -> Option<Category> {
        (self.n_oak(2) == 1).then_some(Category::OnePair)
    }

    /// how many values occur exactly n times
    fn n_oak(&self, n: usize) -> usize {
        self.counts().iter().filter(|&&c| c == n).count()
    }
    fn counts(&self) -> [usize; crate::VALUES] {
        let mut counts = [0; crate::VALUES];
        Value::all()
            .zip(counts.iter_mut())
            .for_each(|(v, c)| *c = self.0.of_value(&v));
        counts
    }
    fn is_flush(&self) -> bool {
        Suit::all()
            .iter()
            .any(|s| self.0.of(s).size() == crate::HAND)
    }
    fn is_straight(&self) -> bool {
        let values = u16::from(self.0);
        let mut bits = values;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits > 0 || self.is_wheel()
    }
    fn is_wheel(&self) -> bool {
        u16::from(self.0) == WHEEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> (Category, [i8; crate::HAND]) {
        let eval = Evaluator::from(Hand::try_from(s).unwrap());
        (eval.find_category(), eval.find_tiebreak())
    }

    #[test]
    fn high_card() {
        assert_eq!(eval("As Kh Qd Jc 9s"), (Category::HighCard, [12, 11, 10, 9, 7]));
    }

    #[test]
    fn one_pair() {
        assert_eq!(eval("2s Ah Kd 2c Js"), (Category::OnePair, [0, 0, 12, 11, 9]));
    }

    #[test]
    fn two_pair() {
        assert_eq!(eval("Ac Ad 2c 2d 3h"), (Category::TwoPair, [12, 12, 0, 0, 1]));
        assert_eq!(eval("Ac Ad Kc Kd Qh"), (Category::TwoPair, [12, 12, 11, 11, 10]));
    }

    #[test]
    fn three_oak_is_not_full_house() {
        assert_eq!(eval("Ac Ad Ah 2c 3c"), (Category::ThreeOAK, [12, 12, 12, 1, 0]));
    }

    #[test]
    fn straight() {
        assert_eq!(eval("2c 3d 4c 5s 6h"), (Category::Straight, [4, 3, 2, 1, 0]));
        assert_eq!(eval("10s Jh Qd Kc As"), (Category::Straight, [12, 11, 10, 9, 8]));
    }

    #[test]
    fn wheel_plays_low() {
        assert_eq!(eval("As 2h 3d 4c 5s"), (Category::Straight, [3, 2, 1, 0, -1]));
        assert_eq!(eval("As 2s 3s 4s 5s"), (Category::StraightFlush, [3, 2, 1, 0, -1]));
        assert!(eval("As 2h 3d 4c 5s").1 < eval("2c 3d 4c 5s 6h").1);
    }

    #[test]
    fn flush() {
        assert_eq!(eval("As Ks Qs Js 9s"), (Category::Flush, [12, 11, 10, 9, 7]));
    }

    #[test]
    fn full_house() {
        assert_eq!(eval("3c 2s 2h 2d 3s"), (Category::FullHouse, [0, 0, 0, 1, 1]));
    }

    #[test]
    fn four_oak() {
        assert_eq!(eval("Ks As Ah Ad Ac"), (Category::FourOAK, [12, 12, 12, 12, 11]));
    }

    #[test]
    fn straight_flush() {
        assert_eq!(eval("2c 3c 4c 5c 6c"), (Category::StraightFlush, [4, 3, 2, 1, 0]));
    }

    #[test]
    fn near_straights() {
        assert_eq!(eval("Qs Ks As 2h 3d").0, Category::HighCard);
        assert_eq!(eval("2c 3d 4c 5s 7h").0, Category::HighCard);
    }
}
