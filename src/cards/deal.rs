use super::card::Card;
use super::deck::Deck;
use super::hand::Hand;
use super::strength::Strength;

/// One Hold'em deal off a cut deck: two hole cards per player, dealt in
/// blocks from the top, then five board cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    holes: Vec<[Card; crate::HOLE]>,
    board: [Card; crate::BOARD],
}

impl Deal {
    pub fn new(deck: &Deck, cut: usize, num_players: usize) -> Self {
        assert!(num_players * crate::HOLE + crate::BOARD <= crate::DECK);
        let cards = deck.cut(cut).collect::<Vec<Card>>();
        let holes = (0..num_players)
            .map(|p| [cards[crate::HOLE * p], cards[crate::HOLE * p + 1]])
            .collect::<Vec<_>>();
        let start = crate::HOLE * num_players;
        let mut board = [cards[start]; crate::BOARD];
        board
            .iter_mut()
            .enumerate()
            .for_each(|(i, b)| *b = cards[start + i]);
        Self { holes, board }
    }

    pub fn board(&self) -> &[Card; crate::BOARD] {
        &self.board
    }
    pub fn hole(&self, player: usize) -> &[Card; crate::HOLE] {
        &self.holes[player]
    }

    /// the seven cards available to a player
    pub fn hand(&self, player: usize) -> Hand {
        Hand::add(
            Hand::from(self.holes[player].as_slice()),
            Hand::from(self.board.as_slice()),
        )
    }

    pub fn strengths(&self) -> Vec<Strength> {
        (0..self.holes.len())
            .map(|p| Strength::from(self.hand(p)))
            .collect()
    }

    /// player 0 strictly beats every other player
    pub fn dealer_wins(&self) -> bool {
        let strengths = self.strengths();
        strengths.iter().skip(1).all(|s| strengths[0] > *s)
    }
}

impl std::fmt::Display for Deal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (p, (hole, strength)) in self.holes.iter().zip(self.strengths()).enumerate() {
            writeln!(f, "P{} {} {}  {}", p, hole[0], hole[1], strength)?;
        }
        write!(f, "board {}", Hand::from(self.board.as_slice()))
    }
}
