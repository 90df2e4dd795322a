use std::fmt;

/// Two grid positions whose tiles are exchanged by one move.
///
/// The positions are normalized on construction so that `pos1 <= pos2`, which
/// makes `SwapPair::new(a, b) == SwapPair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapPair {
    pos1: usize,
    pos2: usize,
}

impl SwapPair {
    /// Builds a normalized pair. Any two positions are accepted; deciding
    /// whether the swap makes sense is the model's job.
    pub fn new(a: usize, b: usize) -> Self {
        SwapPair {
            pos1: a.min(b),
            pos2: a.max(b),
        }
    }

    /// The lower of the two positions.
    pub fn pos1(&self) -> usize {
        self.pos1
    }

    /// The higher of the two positions.
    pub fn pos2(&self) -> usize {
        self.pos2
    }

    /// True when the two positions are direct neighbours in reading order.
    /// This includes the wrap from the end of one row to the start of the next.
    pub fn is_horizontal(&self) -> bool {
        self.pos2 == self.pos1 + 1
    }
}

impl fmt::Display for SwapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pos1, self.pos2)
    }
}
