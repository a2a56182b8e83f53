//! Text and JSON rendering of an alignment result.

use std::fmt;

use serde::Serialize;

use crate::scoring::AlignmentStats;
use crate::traceback::Alignment;
use crate::AlignmentResult;

/// Printable view over an `AlignmentResult`.
///
/// By default only the canonical alignment is shown; `with_all` lists every
/// emitted alignment after it.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentReport<'a> {
    result: &'a AlignmentResult,
    all: bool,
}

#[derive(Serialize)]
struct JsonAlignment {
    seq1: String,
    seq2: String,
    matches: String,
    identity: f64,
    #[serde(flatten)]
    stats: AlignmentStats,
}

#[derive(Serialize)]
struct JsonReport {
    score: i64,
    identity: f64,
    truncated: bool,
    alignments: Vec<JsonAlignment>,
}

impl<'a> AlignmentReport<'a> {
    pub fn new(result: &'a AlignmentResult) -> Self {
        Self { result, all: false }
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    fn shown(&self) -> &'a [Alignment] {
        if self.all {
            self.result.alignments()
        } else {
            std::slice::from_ref(self.result.best())
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            score: self.result.score(),
            identity: self.result.identity(),
            truncated: self.result.is_truncated(),
            alignments: self
                .shown()
                .iter()
                .map(|alignment| JsonAlignment {
                    seq1: String::from_utf8_lossy(&alignment.aligned_seq1).into_owned(),
                    seq2: String::from_utf8_lossy(&alignment.aligned_seq2).into_owned(),
                    matches: alignment.match_line(),
                    identity: alignment.identity(),
                    stats: alignment.stats(),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&report)
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, alignment: &Alignment) -> fmt::Result {
    writeln!(f, "Seq1: {}", String::from_utf8_lossy(&alignment.aligned_seq1))?;
    writeln!(f, "Seq2: {}", String::from_utf8_lossy(&alignment.aligned_seq2))?;
    writeln!(f, "Match: {}", alignment.match_line())
}

impl fmt::Display for AlignmentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {:.1}", self.result.score() as f64)?;
        writeln!(f, "Identity: {:.2}%", self.result.identity())?;
        write_rows(f, self.result.best())?;

        if self.all {
            for (n, alignment) in self.result.alignments().iter().enumerate().skip(1) {
                writeln!(f)?;
                writeln!(f, "Alternative {} (identity {:.2}%)", n, alignment.identity())?;
                write_rows(f, alignment)?;
            }
            if self.result.is_truncated() {
                writeln!(f)?;
                writeln!(f, "(more optimal alignments exist)")?;
            }
        }
        Ok(())
    }
}
