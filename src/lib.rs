//! Global pairwise alignment of short DNA/protein sequences.
//!
//! The engine fills a Needleman-Wunsch score matrix with a linear
//! match/mismatch/gap scheme and walks it back to produce one or more
//! optimal alignments.

use std::time::Instant;

use log::{debug, warn};
use thiserror::Error;

pub mod alignment_mode;
pub mod batch;
pub mod config;
pub mod matrix;
pub mod report;
pub mod scoring;
pub mod sequence;
pub mod traceback;

pub use alignment_mode::{AlignmentMode, Direction};
pub use batch::BatchAligner;
pub use config::AlignerConfig;
pub use matrix::ScoreMatrix;
pub use report::AlignmentReport;
pub use scoring::{AlignmentStats, ScoringScheme};
pub use sequence::{Alphabet, Sequence};
pub use traceback::{Alignment, Traceback, TracebackOperation};

/// Symbol written into an aligned row where the other sequence advanced alone.
pub const GAP_SYMBOL: u8 = b'-';

// Default scoring reproduces "count identical aligned positions".
pub const DEFAULT_MATCH: i64 = 1;
pub const DEFAULT_MISMATCH: i64 = 0;
pub const DEFAULT_GAP: i64 = 0;

pub const DEFAULT_MAX_ALIGNMENTS: usize = 1;

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Resource budget exceeded: {cells} matrix cells requested, limit is {limit}")]
    ResourceExceeded { cells: u128, limit: u64 },
}

pub type Result<T> = std::result::Result<T, AlignerError>;

/// Outcome of one `align` call: the optimal score and every alignment the
/// traceback emitted, canonical one first.
///
/// Only the engine builds these, so `alignments` is never empty.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AlignmentResult {
    score: i64,
    alignments: Vec<Alignment>,
    truncated: bool,
}

impl AlignmentResult {
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    /// Set when the enumeration cap stopped the traceback before every tied
    /// path was visited.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The canonical alignment (diagonal > up > left at every tie).
    pub fn best(&self) -> &Alignment {
        // Non-empty: the traceback always emits the canonical path.
        &self.alignments[0]
    }

    /// Percent identity of the canonical alignment.
    pub fn identity(&self) -> f64 {
        self.best().identity()
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }
}

/// Needleman-Wunsch engine. Holds only immutable configuration, so one
/// instance can be shared across threads and reused for any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    scoring: ScoringScheme,
    config: AlignerConfig,
}

impl Aligner {
    pub fn new(scoring: ScoringScheme) -> Self {
        Self {
            scoring,
            config: AlignerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AlignerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.config = self.config.with_mode(mode);
        self
    }

    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Ingest two raw sequences and align them.
    pub fn align(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<AlignmentResult> {
        let alphabet = self.config.alphabet();
        let a = Sequence::with_alphabet(seq_a, alphabet)?;
        let b = Sequence::with_alphabet(seq_b, alphabet)?;
        self.align_sequences(&a, &b)
    }

    /// Align two already-ingested sequences.
    pub fn align_sequences(&self, a: &Sequence, b: &Sequence) -> Result<AlignmentResult> {
        let start_time = Instant::now();

        self.config.check_budget(a.len(), b.len())?;
        self.scoring.check_range(a.len(), b.len())?;
        let limit = self.config.max_alignments()?;

        let matrix = ScoreMatrix::fill(a.as_bytes(), b.as_bytes(), &self.scoring);
        let score = matrix.final_score();
        debug!(
            "filled {}x{} score matrix, optimal score {}",
            matrix.rows(),
            matrix.cols(),
            score
        );

        let traceback = Traceback::new(&matrix, a.as_bytes(), b.as_bytes(), &self.scoring);
        let (alignments, truncated) = traceback.enumerate(limit);
        if truncated && limit > 1 {
            warn!(
                "traceback stopped after {} alignments; more tied optima exist",
                alignments.len()
            );
        }

        debug!(
            "emitted {} alignment(s) in {:.3} ms",
            alignments.len(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(AlignmentResult {
            score,
            alignments,
            truncated,
        })
    }
}

/// Align two sequences with `scoring` and the default configuration
/// (any alphabet, single canonical alignment, no size budget).
pub fn align(seq_a: &[u8], seq_b: &[u8], scoring: &ScoringScheme) -> Result<AlignmentResult> {
    Aligner::new(*scoring).align(seq_a, seq_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(alignment: &Alignment) -> (String, String) {
        (
            String::from_utf8_lossy(&alignment.aligned_seq1).into_owned(),
            String::from_utf8_lossy(&alignment.aligned_seq2).into_owned(),
        )
    }

    #[test]
    fn reference_pair_has_one_substitution() {
        let result = align(b"ATCGATCGATCG", b"ATCGATGGATCG", &ScoringScheme::default()).unwrap();
        assert_eq!(result.score(), 11);
        let best = result.best();
        assert_eq!(best.len(), 12);
        assert!((best.identity() - 91.666_666).abs() < 1e-3);
        assert_eq!(best.match_line(), "||||||.|||||");
    }

    #[test]
    fn lowercase_input_is_normalized() {
        let result = align(b"acgt", b"ACGT", &ScoringScheme::default()).unwrap();
        assert_eq!(result.score(), 4);
        assert_eq!(result.best().aligned_seq1, b"ACGT");
    }

    #[test]
    fn empty_pair_yields_one_empty_alignment() {
        let result = align(b"", b"", &ScoringScheme::default()).unwrap();
        assert_eq!(result.score(), 0);
        assert_eq!(result.len(), 1);
        assert!(result.best().is_empty());
        assert_eq!(result.identity(), 0.0);
    }

    #[test]
    fn empty_against_sequence_is_all_gaps() {
        let result = align(b"", b"ACGT", &ScoringScheme::default()).unwrap();
        assert_eq!(result.score(), 0);
        let (top, bottom) = rows(result.best());
        assert_eq!(top, "----");
        assert_eq!(bottom, "ACGT");
    }

    #[test]
    fn swapped_tie_pair_defaults_to_single_canonical_result() {
        let result = align(b"AT", b"TA", &ScoringScheme::default()).unwrap();
        assert_eq!(result.score(), 1);
        assert_eq!(result.len(), 1);
        assert!(result.is_truncated());
        assert_eq!(rows(result.best()), ("-AT".to_string(), "TA-".to_string()));
    }

    #[test]
    fn enumeration_lists_every_tied_optimum() {
        let aligner = Aligner::default().with_alignment_mode(AlignmentMode::Enumerate(16));
        let result = aligner.align(b"AT", b"TA").unwrap();
        assert_eq!(result.score(), 1);
        assert!(!result.is_truncated());
        let all: Vec<_> = result.alignments().iter().map(rows).collect();
        assert_eq!(
            all,
            vec![
                ("-AT".to_string(), "TA-".to_string()),
                ("AT-".to_string(), "-TA".to_string()),
            ]
        );
        assert!(result.alignments().iter().all(|a| a.score == 1));
    }

    #[test]
    fn accessors_expose_canonical_alignment_first() {
        let aligner = Aligner::default().with_alignment_mode(AlignmentMode::Enumerate(8));
        let result = aligner.align(b"ACGT", b"TGCA").unwrap();
        assert!(!result.alignments().is_empty());
        assert_eq!(result.best(), &result.alignments()[0]);
        assert_eq!(result.len(), result.alignments().len());
        assert!(result.alignments().iter().all(|a| a.score == result.score()));
    }

    #[test]
    fn alphabet_violation_is_rejected() {
        let config = AlignerConfig::default().with_alphabet(Alphabet::Dna);
        let aligner = Aligner::default().with_config(config);
        let err = aligner.align(b"ACGT", b"ACXT").unwrap_err();
        assert!(matches!(err, AlignerError::InvalidInput(_)));
    }

    #[test]
    fn budget_is_checked_before_filling() {
        let config = AlignerConfig::default().with_max_cells(10);
        let aligner = Aligner::default().with_config(config);
        let err = aligner.align(b"ACGTACGT", b"ACGTACGT").unwrap_err();
        match err {
            AlignerError::ResourceExceeded { cells, limit } => {
                assert_eq!(cells, 81);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_enumeration_cap_is_invalid() {
        let aligner = Aligner::default().with_alignment_mode(AlignmentMode::Enumerate(0));
        let err = aligner.align(b"A", b"A").unwrap_err();
        assert!(matches!(err, AlignerError::InvalidConfiguration(_)));
    }
}
