use std::fmt;

use crate::{AlignerError, Result, GAP_SYMBOL};

/// Residue sets an input may be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// No validation; every byte is an opaque comparable token.
    #[default]
    Any,
    Dna,
    Rna,
    Protein,
}

impl Alphabet {
    fn symbols(&self) -> Option<&'static [u8]> {
        match self {
            Alphabet::Any => None,
            Alphabet::Dna => Some(b"ACGTN"),
            Alphabet::Rna => Some(b"ACGUN"),
            // 20 standard residues, ambiguity codes B/Z/X/J, U/O and stop.
            Alphabet::Protein => Some(b"ACDEFGHIKLMNPQRSTVWYBZXJUO*"),
        }
    }

    /// Whether an uppercase symbol belongs to this alphabet.
    pub fn contains(&self, symbol: u8) -> bool {
        match self.symbols() {
            Some(set) => set.contains(&symbol),
            None => true,
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alphabet::Any => "any",
            Alphabet::Dna => "dna",
            Alphabet::Rna => "rna",
            Alphabet::Protein => "protein",
        };
        f.write_str(name)
    }
}

/// Uppercase-normalized symbol sequence. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    /// Ingest without alphabet checks.
    pub fn new(data: &[u8]) -> Result<Self> {
        Self::with_alphabet(data, Alphabet::Any)
    }

    pub fn with_alphabet(data: &[u8], alphabet: Alphabet) -> Result<Self> {
        let data = data.to_ascii_uppercase();

        if let Some(pos) = data.iter().position(|&s| s == GAP_SYMBOL) {
            return Err(AlignerError::InvalidInput(format!(
                "gap symbol '{}' at position {} is not a valid residue",
                GAP_SYMBOL as char, pos
            )));
        }

        if let Some(pos) = data.iter().position(|&s| !alphabet.contains(s)) {
            return Err(AlignerError::InvalidInput(format!(
                "symbol '{}' at position {} is not in the {} alphabet",
                data[pos].escape_ascii(),
                pos,
                alphabet
            )));
        }

        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
