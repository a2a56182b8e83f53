use nw_aligner::{Aligner, BatchAligner, ScoringScheme};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let pairs = vec![
        ("ACGTACGT", "ACGTAGCT"),
        ("GGTTAACC", "GGTTAACT"),
        ("ATCGATCGATCG", "ATCGATGGATCG"),
        ("MKTAYIAKQRQISITPDVQMK", "MKTAYIAKQRQLSITPDVQMK"),
    ];

    let batch = BatchAligner::new(Aligner::new(ScoringScheme::new(1, -1, -1)?)).with_workers(2)?;

    for (i, result) in batch.try_align_all(&pairs)?.iter().enumerate() {
        let best = result.best();
        println!("Alignment {}: Score = {}, Identity = {:.2}%", i, result.score(), best.identity());
        println!("Sequence 1: {}", String::from_utf8_lossy(&best.aligned_seq1));
        println!("Sequence 2: {}", String::from_utf8_lossy(&best.aligned_seq2));
        println!();
    }

    Ok(())
}
