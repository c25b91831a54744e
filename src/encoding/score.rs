use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::Model;
use crate::model::Relation;

/// Rank and tiebreak of a classified hand. Hands compare by rank, then by
/// tiebreak lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub rank: IntVar,
    pub tiebreak: [IntVar; crate::HAND],
}

/// Lexicographic comparison of two tiebreaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lex {
    pub greater: BoolVar,
    pub equal: BoolVar,
}

/// greater <=> a > b lexicographically, equal <=> a == b
pub fn lex(model: &mut Model, a: &[IntVar; crate::HAND], b: &[IntVar; crate::HAND]) -> Lex {
    let eq: [BoolVar; crate::HAND] = std::array::from_fn(|i| model.reify(a[i], Relation::Eq, b[i]));
    let gt: [BoolVar; crate::HAND] = std::array::from_fn(|i| model.reify(a[i], Relation::Gt, b[i]));
    // prefix <=> every position so far is equal
    let mut prefix = eq[0];
    let mut wins = vec![gt[0]];
    for i in 1..crate::HAND {
        wins.push(model.reify_and([prefix, gt[i]]));
        prefix = model.reify_and([prefix, eq[i]]);
    }
    Lex {
        greater: model.reify_or(wins),
        equal: prefix,
    }
}

impl Score {
    /// b <=> self strictly beats other
    pub fn beats(&self, model: &mut Model, other: &Score) -> BoolVar {
        let higher = model.reify(self.rank, Relation::Gt, other.rank);
        let level = model.reify(self.rank, Relation::Eq, other.rank);
        let kick = lex(model, &self.tiebreak, &other.tiebreak);
        let kicks = model.reify_and([level, kick.greater]);
        model.reify_or([higher, kicks])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Backtrack;
    use crate::solver::Engine;
    use crate::solver::Parameters;

    fn fixed(model: &mut Model, rank: i64, tiebreak: [i64; crate::HAND]) -> Score {
        Score {
            rank: model.new_constant(rank),
            tiebreak: tiebreak.map(|v| model.new_constant(v)),
        }
    }

    fn beats(a: (i64, [i64; crate::HAND]), b: (i64, [i64; crate::HAND])) -> bool {
        let ref mut model = Model::new();
        let a = fixed(model, a.0, a.1);
        let b = fixed(model, b.0, b.1);
        let beats = a.beats(model, &b);
        let response = Backtrack.solve(model, &Parameters::default()).unwrap();
        response.boolean(beats).unwrap()
    }

    #[test]
    fn rank_decides_first() {
        assert!(beats((4, [3, 2, 1, 0, -1]), (3, [12, 12, 12, 11, 10])));
        assert!(!beats((3, [12, 12, 12, 11, 10]), (4, [3, 2, 1, 0, -1])));
    }

    #[test]
    fn last_position_counts() {
        assert!(beats((0, [12, 11, 10, 9, 1]), (0, [12, 11, 10, 9, 0])));
        assert!(!beats((0, [12, 11, 10, 9, 0]), (0, [12, 11, 10, 9, 1])));
    }

    #[test]
    fn first_difference_decides() {
        assert!(beats((2, [12, 12, 11, 11, 0]), (2, [12, 12, 0, 0, 12])));
    }

    #[test]
    fn irreflexive() {
        assert!(!beats((5, [12, 10, 8, 6, 4]), (5, [12, 10, 8, 6, 4])));
    }

    #[test]
    fn lex_reports_equality() {
        let ref mut model = Model::new();
        let a = [1, 2, 3, 4, 5].map(|v| model.new_constant(v));
        let b = [1, 2, 3, 4, 5].map(|v| model.new_constant(v));
        let c = [1, 2, 3, 4, 6].map(|v| model.new_constant(v));
        let ab = lex(model, &a, &b);
        let ca = lex(model, &c, &a);
        let response = Backtrack.solve(model, &Parameters::default()).unwrap();
        assert_eq!(response.boolean(ab.equal), Some(true));
        assert_eq!(response.boolean(ab.greater), Some(false));
        assert_eq!(response.boolean(ca.equal), Some(false));
        assert_eq!(response.boolean(ca.greater), Some(true));
    }
}
