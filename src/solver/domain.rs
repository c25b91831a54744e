/// A finite integer domain of at most 128 consecutive candidates,
/// stored as a bitset offset from `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain {
    base: i64,
    bits: u128,
}

impl Domain {
    pub const WIDTH: i64 = 128;

    /// [lo, hi], which must span at most 128 values
    pub fn range(lo: i64, hi: i64) -> Self {
        let span = hi - lo + 1;
        assert!((1..=Self::WIDTH).contains(&span), "domain [{}, {}]", lo, hi);
        let bits = if span == Self::WIDTH {
            u128::MAX
        } else {
            (1u128 << span) - 1
        };
        Self { base: lo, bits }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
    pub fn size(&self) -> usize {
        self.bits.count_ones() as usize
    }
    pub fn min(&self) -> i64 {
        debug_assert!(!self.is_empty());
        self.base + self.bits.trailing_zeros() as i64
    }
    pub fn max(&self) -> i64 {
        debug_assert!(!self.is_empty());
        self.base + 127 - self.bits.leading_zeros() as i64
    }
    pub fn fixed(&self) -> Option<i64> {
        (self.size() == 1).then(|| self.min())
    }
    pub fn contains(&self, v: i64) -> bool {
        let offset = v - self.base;
        (0..Self::WIDTH).contains(&offset) && self.bits & (1 << offset) != 0
    }

    pub fn remove(self, v: i64) -> Self {
        if self.contains(v) {
            Self {
                base: self.base,
                bits: self.bits & !(1 << (v - self.base)),
            }
        } else {
            self
        }
    }
    pub fn only(self, v: i64) -> Self {
        if self.contains(v) {
            Self {
                base: self.base,
                bits: 1 << (v - self.base),
            }
        } else {
            Self {
                base: self.base,
                bits: 0,
            }
        }
    }
    pub fn at_least(self, v: i64) -> Self {
        let offset = v - self.base;
        let bits = match offset {
            ..=0 => self.bits,
            Self::WIDTH.. => 0,
            n => self.bits & (u128::MAX << n),
        };
        Self {
            base: self.base,
            bits,
        }
    }
    pub fn at_most(self, v: i64) -> Self {
        let offset = v - self.base;
        let bits = match offset {
            ..0 => 0,
            127.. => self.bits,
            n => self.bits & ((1u128 << (n + 1)) - 1),
        };
        Self {
            base: self.base,
            bits,
        }
    }

    /// values in ascending order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        (0..Self::WIDTH)
            .filter(move |i| self.bits & (1 << i) != 0)
            .map(move |i| self.base + i)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.is_empty(), self.fixed()) {
            (true, _) => write!(f, "{{}}"),
            (false, Some(v)) => write!(f, "{{{}}}", v),
            (false, None) => write!(f, "[{}..{}]/{}", self.min(), self.max(), self.size()),
        }
    }
}
