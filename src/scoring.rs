use crate::{AlignerError, Result, DEFAULT_GAP, DEFAULT_MATCH, DEFAULT_MISMATCH};

/// Linear scoring: one value for identical pairs, one for differing pairs and
/// one for every symbol set against a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoringScheme {
    pub match_score: i64,
    pub mismatch_score: i64,
    pub gap_score: i64,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch_score: DEFAULT_MISMATCH,
            gap_score: DEFAULT_GAP,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i64, mismatch_score: i64, gap_score: i64) -> Result<Self> {
        let scheme = Self {
            match_score,
            mismatch_score,
            gap_score,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    pub fn with_match(mut self, match_score: i64) -> Result<Self> {
        self.match_score = match_score;
        self.validate()?;
        Ok(self)
    }

    pub fn with_mismatch(mut self, mismatch_score: i64) -> Result<Self> {
        self.mismatch_score = mismatch_score;
        self.validate()?;
        Ok(self)
    }

    pub fn with_gap(mut self, gap_score: i64) -> Result<Self> {
        self.gap_score = gap_score;
        self.validate()?;
        Ok(self)
    }

    /// A differing pair may never outscore an identical one.
    pub fn validate(&self) -> Result<()> {
        if self.mismatch_score > self.match_score {
            return Err(AlignerError::InvalidConfiguration(format!(
                "mismatch score {} exceeds match score {}",
                self.mismatch_score, self.match_score
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn score_pair(&self, a: u8, b: u8) -> i64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Reject inputs whose cell values could leave the i64 range.
    ///
    /// Every path to the last cell takes at most `len_a + len_b` steps and
    /// each step adds one of the three scores, so that product bounds every
    /// cell magnitude.
    pub fn check_range(&self, len_a: usize, len_b: usize) -> Result<()> {
        self.validate()?;

        let steps = (len_a as u128) + (len_b as u128);
        let widest = [self.match_score, self.mismatch_score, self.gap_score]
            .iter()
            .map(|s| s.unsigned_abs() as u128)
            .max()
            .unwrap_or(0);

        match steps.checked_mul(widest) {
            Some(bound) if bound <= i64::MAX as u128 => Ok(()),
            _ => Err(AlignerError::InvalidConfiguration(format!(
                "scores up to {} over {} steps would overflow 64-bit cell values",
                widest, steps
            ))),
        }
    }
}

/// Column counts of one alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

impl AlignmentStats {
    pub fn columns(&self) -> usize {
        self.matches + self.mismatches + self.gaps
    }
}
