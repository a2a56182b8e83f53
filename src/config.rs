use serde::{Deserialize, Serialize};

use crate::alignment_mode::AlignmentMode;
use crate::sequence::Alphabet;
use crate::{AlignerError, Result};

/// Per-engine settings that sit beside the scoring scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignerConfig {
    pub mode: AlignmentMode,
    pub alphabet: Alphabet,
    /// Largest `(len_a + 1) * (len_b + 1)` the engine will allocate.
    /// `None` means unbounded.
    pub max_cells: Option<u64>,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Single,
            alphabet: Alphabet::Any,
            max_cells: None,
        }
    }
}

impl AlignerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: AlignmentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `Single` when `limit` is 1 and `Enumerate(limit)`
    /// otherwise.
    pub fn with_max_alignments(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(AlignerError::InvalidConfiguration(
                "max alignments must be at least 1".to_string(),
            ));
        }
        self.mode = if limit == 1 {
            AlignmentMode::Single
        } else {
            AlignmentMode::Enumerate(limit)
        };
        Ok(self)
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn max_alignments(&self) -> Result<usize> {
        match self.mode.limit() {
            0 => Err(AlignerError::InvalidConfiguration(
                "max alignments must be at least 1".to_string(),
            )),
            n => Ok(n),
        }
    }

    /// Fails with `ResourceExceeded` when the matrix for these lengths is
    /// over the `max_cells` budget or not addressable at all.
    ///
    /// The addressability check is a hard allocation bound that applies even
    /// without `max_cells`; it is not a policy budget.
    pub fn check_budget(&self, len_a: usize, len_b: usize) -> Result<()> {
        let cells = (len_a as u128 + 1).saturating_mul(len_b as u128 + 1);

        if let Some(limit) = self.max_cells {
            if cells > limit as u128 {
                return Err(AlignerError::ResourceExceeded { cells, limit });
            }
        }

        let addressable = (isize::MAX as usize / std::mem::size_of::<i64>()) as u128;
        if cells > addressable {
            return Err(AlignerError::ResourceExceeded {
                cells,
                limit: addressable as u64,
            });
        }
        Ok(())
    }
}
