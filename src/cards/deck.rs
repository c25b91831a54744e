use super::card::Card;
use super::deal::Deal;
use super::hand::Hand;
use rand::Rng;
use rand::seq::SliceRandom;

/// A full ordering of the 52 cards. Position 0 is the top of the deck.
/// Construction always checks that every card appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// factory order, 2c first and As last
    pub fn new() -> Self {
        Self(Card::all().collect())
    }

    pub fn random() -> Self {
        Self::shuffled(&mut rand::rng())
    }
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut cards = Card::all().collect::<Vec<Card>>();
        cards.shuffle(rng);
        Self(cards)
    }

    /// Two-point order crossover: our cards between two random points stay
    /// in place, the rest follow in the other deck's order.
    pub fn crossover(&self, other: &Self, rng: &mut impl Rng) -> Self {
        let a = rng.random_range(0..crate::DECK);
        let b = rng.random_range(0..crate::DECK);
        let (lo, hi) = (a.min(b), a.max(b));
        let kept = Hand::from(&self.0[lo..hi]);
        let mut rest = other.0.iter().copied().filter(|c| !kept.contains(c));
        let head = rest.by_ref().take(lo).collect::<Vec<Card>>();
        Self(
            head.into_iter()
                .chain(self.0[lo..hi].iter().copied())
                .chain(rest)
                .collect(),
        )
    }

    /// one to three random transpositions
    pub fn mutate(mut self, rng: &mut impl Rng) -> Self {
        for _ in 0..rng.random_range(1..4) {
            let a = rng.random_range(0..crate::DECK);
            let b = rng.random_range(0..crate::DECK);
            self.0.swap(a, b);
        }
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn ids(&self) -> Vec<u8> {
        self.0.iter().map(|c| u8::from(*c)).collect()
    }

    /// the cyclic view starting at position cut
    pub fn cut(&self, cut: usize) -> impl Iterator<Item = Card> + '_ {
        self.0.iter().cycle().skip(cut % crate::DECK).take(crate::DECK).copied()
    }

    /// the cuts at which player 0 wins outright
    pub fn wins(&self, num_players: usize, num_cuts: usize) -> Vec<usize> {
        (0..num_cuts)
            .filter(|cut| Deal::new(self, *cut, num_players).dealer_wins())
            .collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Vec<Card> isomorphism, restricted to permutations
impl TryFrom<Vec<Card>> for Deck {
    type Error = anyhow::Error;
    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        anyhow::ensure!(
            cards.len() == crate::DECK,
            "deck has {} cards, expected {}",
            cards.len(),
            crate::DECK
        );
        let hand = Hand::from(cards.as_slice());
        anyhow::ensure!(hand.size() == crate::DECK, "deck repeats a card");
        Ok(Self(cards))
    }
}
impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

/// solver assignments come back as i64 ids in position order
impl TryFrom<&[i64]> for Deck {
    type Error = anyhow::Error;
    fn try_from(ids: &[i64]) -> Result<Self, Self::Error> {
        let cards = ids
            .iter()
            .map(|id| Card::try_from(*id))
            .collect::<anyhow::Result<Vec<Card>>>()?;
        Self::try_from(cards)
    }
}

/// str isomorphism
/// comma or whitespace separated, each entry an id or a card string
impl TryFrom<&str> for Deck {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cards = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| match t.parse::<i64>() {
                Ok(id) => Card::try_from(id),
                Err(_) => Card::try_from(t),
            })
            .collect::<anyhow::Result<Vec<Card>>>()?;
        Self::try_from(cards)
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ids = self
            .ids()
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn is_permutation(deck: &Deck) -> bool {
        Deck::try_from(deck.cards().to_vec()).is_ok()
    }

    #[test]
    fn crossover_keeps_a_segment_and_stays_a_deck() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let mother = Deck::shuffled(rng);
        let father = Deck::shuffled(rng);
        for _ in 0..100 {
            let child = mother.crossover(&father, rng);
            assert!(is_permutation(&child));
            let shared = (0..crate::DECK)
                .filter(|i| child.cards()[*i] == mother.cards()[*i] || child.cards()[*i] == father.cards()[*i])
                .count();
            assert!(shared > 0);
        }
    }

    #[test]
    fn crossover_of_equal_parents_is_identity() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        let deck = Deck::shuffled(rng);
        assert_eq!(deck.crossover(&deck, rng), deck);
    }

    #[test]
    fn mutation_swaps_few_cards() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let deck = Deck::shuffled(rng);
            let child = deck.clone().mutate(rng);
            assert!(is_permutation(&child));
            let moved = (0..crate::DECK)
                .filter(|i| child.cards()[*i] != deck.cards()[*i])
                .count();
            assert!(moved <= 6);
        }
    }

    #[test]
    fn factory_order() {
        let deck = Deck::new();
        assert_eq!(deck.ids(), (0..52).collect::<Vec<u8>>());
    }

    #[test]
    fn random_is_permutation() {
        let deck = Deck::random();
        assert!(Deck::try_from(Vec::<Card>::from(deck)).is_ok());
    }

    #[test]
    fn cut_is_cyclic() {
        let deck = Deck::new();
        let cut = deck.cut(50).map(u8::from).take(4).collect::<Vec<u8>>();
        assert_eq!(cut, vec![50, 51, 0, 1]);
        assert_eq!(deck.cut(0).count(), 52);
    }

    #[test]
    fn rejects_non_permutations() {
        let mut ids = (0..52).collect::<Vec<i64>>();
        assert!(Deck::try_from(ids.as_slice()).is_ok());
        ids[1] = 0;
        assert!(Deck::try_from(ids.as_slice()).is_err());
        ids.pop();
        assert!(Deck::try_from(ids.as_slice()).is_err());
        assert!(Deck::try_from(&[52i64][..]).is_err());
    }

    #[test]
    fn bijective_str() {
        let deck = Deck::random();
        assert_eq!(deck, Deck::try_from(deck.to_string().as_str()).unwrap());
        let named = Deck::new()
            .cards()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(Deck::new(), Deck::try_from(named.as_str()).unwrap());
    }
}
