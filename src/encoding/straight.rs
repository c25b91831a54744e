use super::occurrences::Occurrences;
use crate::model::BoolVar;
use crate::model::LinearExpr;
use crate::model::Model;
use crate::model::Relation;

/// ace, two, three, four, five
const WHEEL: [usize; crate::HAND] = [0, 1, 2, 3, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Straight {
    /// the values are exactly one of the ten admissible sets
    pub any: BoolVar,
    /// the values are exactly the wheel
    pub wheel: BoolVar,
}

/// the ten admissible value sets, wheel last
fn windows() -> impl Iterator<Item = [usize; crate::HAND]> {
    (0..=crate::VALUES - crate::HAND)
        .map(|lo| std::array::from_fn(|i| lo + i))
        .chain(std::iter::once(WHEEL))
}

impl Straight {
    pub fn detect(model: &mut Model, occurrences: &Occurrences) -> Self {
        let matches = windows()
            .map(|window| {
                let hits = window.map(|k| occurrences.present[k]);
                let inside = window
                    .iter()
                    .map(|k| occurrences.counts[*k])
                    .sum::<LinearExpr>();
                let covered = model.reify_and(hits);
                let contained = model.reify(inside, Relation::Eq, crate::HAND as i64);
                model.reify_and([covered, contained])
            })
            .collect::<Vec<BoolVar>>();
        let wheel = matches[matches.len() - 1];
        let any = model.reify_or(matches);
        Self { any, wheel }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_windows() {
        let windows = windows().collect::<Vec<_>>();
        assert_eq!(windows.len(), 10);
        assert_eq!(windows[0], [0, 1, 2, 3, 4]);
        assert_eq!(windows[8], [8, 9, 10, 11, 12]);
        assert_eq!(windows[9], WHEEL);
    }
}
