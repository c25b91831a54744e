use std::ops::Not;

/// An integer decision variable, an index into its Model.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct IntVar(usize);

/// A 0/1 variable. Shares the index space of IntVar.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoolVar(usize);

/// A BoolVar or its negation.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal {
    var: BoolVar,
    negated: bool,
}

impl IntVar {
    pub fn index(&self) -> usize {
        self.0
    }
    pub(crate) fn remap(self, f: &impl Fn(usize) -> usize) -> Self {
        Self(f(self.0))
    }
}
impl BoolVar {
    pub fn index(&self) -> usize {
        self.0
    }
    pub(crate) fn remap(self, f: &impl Fn(usize) -> usize) -> Self {
        Self(f(self.0))
    }
}
impl Literal {
    pub fn var(&self) -> BoolVar {
        self.var
    }
    pub fn negated(&self) -> bool {
        self.negated
    }
    /// the value the underlying variable takes when this literal holds
    pub fn polarity(&self) -> i64 {
        if self.negated { 0 } else { 1 }
    }
    pub(crate) fn remap(self, f: &impl Fn(usize) -> usize) -> Self {
        Self {
            var: self.var.remap(f),
            negated: self.negated,
        }
    }
}

/// index isomorphisms, only the Model hands these out
impl From<usize> for IntVar {
    fn from(i: usize) -> Self {
        Self(i)
    }
}
impl From<usize> for BoolVar {
    fn from(i: usize) -> Self {
        Self(i)
    }
}

/// every boolean is an integer in [0, 1]
impl From<BoolVar> for IntVar {
    fn from(b: BoolVar) -> Self {
        Self(b.0)
    }
}
impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Self {
            var,
            negated: false,
        }
    }
}

impl Not for BoolVar {
    type Output = Literal;
    fn not(self) -> Literal {
        Literal {
            var: self,
            negated: true,
        }
    }
}
impl Not for Literal {
    type Output = Literal;
    fn not(self) -> Literal {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.negated {
            write!(f, "!b{}", self.var.0)
        } else {
            write!(f, "b{}", self.var.0)
        }
    }
}
