use serde::{Deserialize, Serialize};

/// How many optimal alignments the traceback should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignmentMode {
    /// Only the canonical alignment.
    #[default]
    Single,
    /// Every tied optimum, up to the given count.
    Enumerate(usize),
}

impl AlignmentMode {
    pub fn limit(&self) -> usize {
        match self {
            AlignmentMode::Single => 1,
            AlignmentMode::Enumerate(n) => *n,
        }
    }
}

/// One backward move through the score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Both sequences advance (match or mismatch).
    Diagonal,
    /// Only the first sequence advances; the second gets a gap.
    Up,
    /// Only the second sequence advances; the first gets a gap.
    Left,
}

impl Direction {
    /// Tie-break order used by the traceback.
    pub const PRIORITY: [Direction; 3] = [Direction::Diagonal, Direction::Up, Direction::Left];

    /// `(row, col)` offset subtracted when taking this step.
    pub fn offset(&self) -> (usize, usize) {
        match self {
            Direction::Diagonal => (1, 1),
            Direction::Up => (1, 0),
            Direction::Left => (0, 1),
        }
    }
}
