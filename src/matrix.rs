use crate::alignment_mode::Direction;
use crate::scoring::ScoringScheme;

/// Row-major `(len_a + 1) x (len_b + 1)` table of best prefix-pair scores.
pub struct ScoreMatrix {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl ScoreMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build the full matrix for `seq_a` (rows) against `seq_b` (columns).
    ///
    /// Callers must have run `ScoringScheme::check_range` for these lengths.
    pub fn fill(seq_a: &[u8], seq_b: &[u8], scoring: &ScoringScheme) -> Self {
        let mut matrix = Self::new(seq_a.len() + 1, seq_b.len() + 1);
        let gap = scoring.gap_score;

        for i in 1..matrix.rows {
            matrix.set(i, 0, matrix.get(i - 1, 0) + gap);
        }
        for j in 1..matrix.cols {
            matrix.set(0, j, matrix.get(0, j - 1) + gap);
        }

        for i in 1..matrix.rows {
            let a = seq_a[i - 1];
            for j in 1..matrix.cols {
                let diag = matrix.get(i - 1, j - 1) + scoring.score_pair(a, seq_b[j - 1]);
                let up = matrix.get(i - 1, j) + gap;
                let left = matrix.get(i, j - 1) + gap;
                matrix.set(i, j, diag.max(up).max(left));
            }
        }

        matrix
    }

    fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn final_score(&self) -> i64 {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Directions out of `(row, col)` whose predecessor reproduces the cell
    /// value, in tie-break priority order.
    pub fn optimal_steps(
        &self,
        row: usize,
        col: usize,
        seq_a: &[u8],
        seq_b: &[u8],
        scoring: &ScoringScheme,
    ) -> Vec<Direction> {
        let value = self.get(row, col);
        let gap = scoring.gap_score;

        Direction::PRIORITY
            .into_iter()
            .filter(|dir| match dir {
                Direction::Diagonal => {
                    row > 0
                        && col > 0
                        && self.get(row - 1, col - 1)
                            + scoring.score_pair(seq_a[row - 1], seq_b[col - 1])
                            == value
                }
                Direction::Up => row > 0 && self.get(row - 1, col) + gap == value,
                Direction::Left => col > 0 && self.get(row, col - 1) + gap == value,
            })
            .collect()
    }
}
