use nw_aligner::{Aligner, AlignerConfig, AlignmentMode, AlignmentReport, ScoringScheme};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Default scoring: a tie-prone "count matches" scheme.
    let aligner = Aligner::new(ScoringScheme::default())
        .with_config(AlignerConfig::new().with_mode(AlignmentMode::Enumerate(8)));

    let result = aligner.align(b"AT", b"TA")?;
    println!("{}", AlignmentReport::new(&result).with_all(true));

    // Penalising gaps collapses most of the ties.
    let strict = Aligner::new(ScoringScheme::new(2, -1, -2)?)
        .with_alignment_mode(AlignmentMode::Enumerate(8));
    let result = strict.align(b"ACGTACGT", b"ACGTAGCT")?;
    println!("{}", AlignmentReport::new(&result).with_all(true));

    Ok(())
}
