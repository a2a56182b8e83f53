use log::trace;
use serde::Serialize;

use crate::alignment_mode::Direction;
use crate::matrix::ScoreMatrix;
use crate::scoring::{AlignmentStats, ScoringScheme};
use crate::GAP_SYMBOL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap in the first sequence, symbol from the second.
    Insertion,
    /// Symbol from the first sequence, gap in the second.
    Deletion,
}

/// One optimal global alignment. Both rows have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub score: i64,
    #[serde(serialize_with = "as_text")]
    pub aligned_seq1: Vec<u8>,
    #[serde(serialize_with = "as_text")]
    pub aligned_seq2: Vec<u8>,
    pub operations: Vec<TracebackOperation>,
}

fn as_text<S: serde::Serializer>(row: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(row))
}

impl Alignment {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn stats(&self) -> AlignmentStats {
        self.operations
            .iter()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }

    /// Identical non-gap columns as a percentage of all columns.
    /// An empty alignment has 0% identity.
    pub fn identity(&self) -> f64 {
        let stats = self.stats();
        if stats.columns() == 0 {
            return 0.0;
        }
        stats.matches as f64 / stats.columns() as f64 * 100.0
    }

    /// `|` under identical pairs, `.` everywhere else.
    pub fn match_line(&self) -> String {
        self.operations
            .iter()
            .map(|op| match op {
                TracebackOperation::Match => '|',
                _ => '.',
            })
            .collect()
    }

    /// First row with gaps removed; equals the ingested first sequence.
    pub fn ungapped_seq1(&self) -> Vec<u8> {
        strip_gaps(&self.aligned_seq1)
    }

    pub fn ungapped_seq2(&self) -> Vec<u8> {
        strip_gaps(&self.aligned_seq2)
    }
}

fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&s| s != GAP_SYMBOL).collect()
}

/// Pending branch of the backward walk.
struct Frame {
    row: usize,
    col: usize,
    /// Path length at the moment this branch was pushed.
    depth: usize,
    step: Option<TracebackOperation>,
}

/// Walks a filled `ScoreMatrix` from the last cell back to the origin.
pub struct Traceback<'a> {
    matrix: &'a ScoreMatrix,
    seq1: &'a [u8],
    seq2: &'a [u8],
    scoring: &'a ScoringScheme,
}

impl<'a> Traceback<'a> {
    pub fn new(
        matrix: &'a ScoreMatrix,
        seq1: &'a [u8],
        seq2: &'a [u8],
        scoring: &'a ScoringScheme,
    ) -> Self {
        Self {
            matrix,
            seq1,
            seq2,
            scoring,
        }
    }

    /// Canonical alignment: take the highest-priority optimal step at every
    /// cell.
    pub fn reconstruct(&self) -> Alignment {
        let (mut alignments, _) = self.enumerate(1);
        alignments.remove(0)
    }

    /// Depth-first over all optimal paths, diagonal before up before left,
    /// stopping after `limit` alignments. The flag reports whether unexplored
    /// optimal paths were left behind.
    ///
    /// Uses an explicit stack so depth is bounded by heap, not call stack.
    pub fn enumerate(&self, limit: usize) -> (Vec<Alignment>, bool) {
        let limit = limit.max(1);
        let mut alignments = Vec::new();
        let mut path: Vec<TracebackOperation> = Vec::with_capacity(self.seq1.len() + self.seq2.len());
        let mut stack = vec![Frame {
            row: self.seq1.len(),
            col: self.seq2.len(),
            depth: 0,
            step: None,
        }];

        while let Some(frame) = stack.pop() {
            path.truncate(frame.depth);
            if let Some(op) = frame.step {
                path.push(op);
            }

            if frame.row == 0 && frame.col == 0 {
                let alignment = self.build(&path);
                trace!(
                    "alignment {}: {} / {}",
                    alignments.len(),
                    String::from_utf8_lossy(&alignment.aligned_seq1),
                    String::from_utf8_lossy(&alignment.aligned_seq2)
                );
                alignments.push(alignment);
                if alignments.len() >= limit {
                    break;
                }
                continue;
            }

            let steps = self.matrix.optimal_steps(
                frame.row,
                frame.col,
                self.seq1,
                self.seq2,
                self.scoring,
            );
            // Reverse so the highest-priority branch is popped first.
            for dir in steps.into_iter().rev() {
                let (dr, dc) = dir.offset();
                stack.push(Frame {
                    row: frame.row - dr,
                    col: frame.col - dc,
                    depth: path.len(),
                    step: Some(self.operation(dir, frame.row, frame.col)),
                });
            }
        }

        // Every pushed cell lies on an optimal path and has its own route back
        // to the origin, so anything left on the stack is another alignment.
        let truncated = !stack.is_empty();
        (alignments, truncated)
    }

    fn operation(&self, dir: Direction, row: usize, col: usize) -> TracebackOperation {
        match dir {
            Direction::Diagonal if self.seq1[row - 1] == self.seq2[col - 1] => {
                TracebackOperation::Match
            }
            Direction::Diagonal => TracebackOperation::Mismatch,
            Direction::Up => TracebackOperation::Deletion,
            Direction::Left => TracebackOperation::Insertion,
        }
    }

    /// `path` runs from the last cell back to the origin.
    fn build(&self, path: &[TracebackOperation]) -> Alignment {
        let mut aligned_seq1 = Vec::with_capacity(path.len());
        let mut aligned_seq2 = Vec::with_capacity(path.len());
        let (mut i, mut j) = (0, 0);

        for op in path.iter().rev() {
            match op {
                TracebackOperation::Match | TracebackOperation::Mismatch => {
                    aligned_seq1.push(self.seq1[i]);
                    aligned_seq2.push(self.seq2[j]);
                    i += 1;
                    j += 1;
                }
                TracebackOperation::Deletion => {
                    aligned_seq1.push(self.seq1[i]);
                    aligned_seq2.push(GAP_SYMBOL);
                    i += 1;
                }
                TracebackOperation::Insertion => {
                    aligned_seq1.push(GAP_SYMBOL);
                    aligned_seq2.push(self.seq2[j]);
                    j += 1;
                }
            }
        }

        Alignment {
            score: self.matrix.final_score(),
            aligned_seq1,
            aligned_seq2,
            operations: path.iter().rev().copied().collect(),
        }
    }
}
