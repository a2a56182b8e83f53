use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use nw_aligner::{Aligner, AlignerConfig, AlignmentReport, Alphabet, ScoringScheme};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlphabetArg {
    Any,
    Dna,
    Rna,
    Protein,
}

impl From<AlphabetArg> for Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Any => Alphabet::Any,
            AlphabetArg::Dna => Alphabet::Dna,
            AlphabetArg::Rna => Alphabet::Rna,
            AlphabetArg::Protein => Alphabet::Protein,
        }
    }
}

/// Global (Needleman-Wunsch) alignment of two sequences.
#[derive(Debug, Parser)]
#[command(name = "nw-align", version)]
struct Args {
    /// First sequence
    seq_a: String,

    /// Second sequence
    seq_b: String,

    /// Score for identical aligned symbols
    #[arg(long, default_value_t = nw_aligner::DEFAULT_MATCH, allow_negative_numbers = true)]
    match_score: i64,

    /// Score for differing aligned symbols
    #[arg(long, default_value_t = nw_aligner::DEFAULT_MISMATCH, allow_negative_numbers = true)]
    mismatch_score: i64,

    /// Score for a symbol aligned against a gap
    #[arg(long, default_value_t = nw_aligner::DEFAULT_GAP, allow_negative_numbers = true)]
    gap_score: i64,

    /// Report up to this many tied optimal alignments
    #[arg(long, default_value_t = nw_aligner::DEFAULT_MAX_ALIGNMENTS)]
    max_alignments: usize,

    /// Reject symbols outside this alphabet
    #[arg(long, value_enum, default_value = "any")]
    alphabet: AlphabetArg,

    /// Refuse pairs whose score matrix would exceed this many cells
    #[arg(long)]
    max_cells: Option<u64>,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scoring = ScoringScheme::new(args.match_score, args.mismatch_score, args.gap_score)
        .context("invalid scoring scheme")?;

    let mut config = AlignerConfig::new()
        .with_max_alignments(args.max_alignments)
        .context("invalid --max-alignments")?
        .with_alphabet(args.alphabet.into());
    if let Some(max_cells) = args.max_cells {
        config = config.with_max_cells(max_cells);
    }

    let aligner = Aligner::new(scoring).with_config(config);
    info!(
        "aligning {} vs {} residues",
        args.seq_a.len(),
        args.seq_b.len()
    );

    let result = aligner
        .align(args.seq_a.as_bytes(), args.seq_b.as_bytes())
        .context("alignment failed")?;

    let report = AlignmentReport::new(&result).with_all(args.max_alignments > 1);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
