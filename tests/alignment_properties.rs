use nw_aligner::{align, Aligner, AlignerConfig, AlignerError, AlignmentMode, ScoringScheme, TracebackOperation};
use proptest::prelude::*;

fn dna_seq(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            Just(b'A'),
            Just(b'C'),
            Just(b'G'),
            Just(b'T'),
            Just(b'a'),
            Just(b'c'),
            Just(b'g'),
            Just(b't'),
        ],
        min_len..=max_len,
    )
}

/// Linear schemes with `mismatch <= match`, gap costs on either side of zero.
fn scoring_scheme() -> impl Strategy<Value = ScoringScheme> {
    (1i64..=5, -5i64..=1, -6i64..=1).prop_map(|(m, x, g)| {
        ScoringScheme::new(m, x, g).expect("mismatch never exceeds match")
    })
}

fn rescore(ops: &[TracebackOperation], scoring: &ScoringScheme) -> i64 {
    ops.iter()
        .map(|op| match op {
            TracebackOperation::Match => scoring.match_score,
            TracebackOperation::Mismatch => scoring.mismatch_score,
            TracebackOperation::Insertion | TracebackOperation::Deletion => scoring.gap_score,
        })
        .sum()
}

proptest! {
    #[test]
    fn score_is_symmetric_under_swap(
        a in dna_seq(0, 14),
        b in dna_seq(0, 14),
        scoring in scoring_scheme(),
    ) {
        let forward = align(&a, &b, &scoring).unwrap();
        let backward = align(&b, &a, &scoring).unwrap();
        prop_assert_eq!(forward.score(), backward.score());
    }

    #[test]
    fn self_alignment_scores_length_with_full_identity(a in dna_seq(1, 30)) {
        let result = align(&a, &a, &ScoringScheme::default()).unwrap();
        prop_assert_eq!(result.score(), a.len() as i64);
        prop_assert!((result.identity() - 100.0).abs() < 1e-10,
            "identical seqs should have 100% identity, got {}", result.identity());
    }

    #[test]
    fn repeated_calls_are_identical(
        a in dna_seq(0, 12),
        b in dna_seq(0, 12),
        scoring in scoring_scheme(),
    ) {
        let aligner = Aligner::new(scoring).with_alignment_mode(AlignmentMode::Enumerate(50));
        let first = aligner.align(&a, &b).unwrap();
        let second = aligner.align(&a, &b).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_alignment_round_trips_and_carries_the_optimum(
        a in dna_seq(0, 12),
        b in dna_seq(0, 12),
        scoring in scoring_scheme(),
    ) {
        let aligner = Aligner::new(scoring).with_alignment_mode(AlignmentMode::Enumerate(64));
        let result = aligner.align(&a, &b).unwrap();
        prop_assert!(!result.is_empty());
        for alignment in result.alignments() {
            prop_assert_eq!(alignment.score, result.score());
            prop_assert_eq!(alignment.ungapped_seq1(), a.to_ascii_uppercase());
            prop_assert_eq!(alignment.ungapped_seq2(), b.to_ascii_uppercase());
            prop_assert_eq!(alignment.aligned_seq1.len(), alignment.aligned_seq2.len());
            prop_assert!(alignment.len() >= a.len().max(b.len()));
            prop_assert_eq!(rescore(&alignment.operations, &scoring), result.score());
        }
    }

    #[test]
    fn enumerated_alignments_are_distinct(a in dna_seq(0, 8), b in dna_seq(0, 8)) {
        let aligner = Aligner::default().with_alignment_mode(AlignmentMode::Enumerate(200));
        let result = aligner.align(&a, &b).unwrap();
        let alignments = result.alignments();
        for (i, x) in alignments.iter().enumerate() {
            for y in &alignments[i + 1..] {
                prop_assert_ne!(
                    (&x.aligned_seq1, &x.aligned_seq2),
                    (&y.aligned_seq1, &y.aligned_seq2)
                );
            }
        }
    }

    #[test]
    fn single_mode_returns_first_enumerated_alignment(
        a in dna_seq(0, 12),
        b in dna_seq(0, 12),
        scoring in scoring_scheme(),
    ) {
        let one = Aligner::new(scoring).align(&a, &b).unwrap();
        let all = Aligner::new(scoring)
            .with_alignment_mode(AlignmentMode::Enumerate(64))
            .align(&a, &b)
            .unwrap();
        prop_assert_eq!(one.len(), 1);
        prop_assert_eq!(one.best(), all.best());
    }
}

#[test]
fn empty_inputs() {
    let result = align(b"", b"", &ScoringScheme::default()).unwrap();
    assert_eq!(result.score(), 0);
    assert_eq!(result.len(), 1);
    assert!(result.best().aligned_seq1.is_empty());
    assert!(result.best().aligned_seq2.is_empty());

    let result = align(b"", b"ACGT", &ScoringScheme::default()).unwrap();
    assert_eq!(result.score(), 0);
    assert_eq!(result.best().aligned_seq1, b"----");
    assert_eq!(result.best().aligned_seq2, b"ACGT");
    assert_eq!(result.best().stats().gaps, 4);
}

#[test]
fn reference_pair() {
    let result = align(b"ATCGATCGATCG", b"ATCGATGGATCG", &ScoringScheme::default()).unwrap();
    assert_eq!(result.score(), 11);
    assert!((result.identity() - 91.67).abs() < 0.01);
    let stats = result.best().stats();
    assert_eq!((stats.matches, stats.mismatches, stats.gaps), (11, 1, 0));
}

#[test]
fn identical_homopolymer_has_no_ties() {
    let aligner = Aligner::default().with_alignment_mode(AlignmentMode::Enumerate(100));
    let result = aligner.align(b"AAAA", b"AAAA").unwrap();
    assert_eq!(result.score(), 4);
    assert_eq!(result.len(), 1);
    assert!(!result.is_truncated());
    assert_eq!(result.identity(), 100.0);
}

#[test]
fn swapped_dinucleotide_ties() {
    let canonical = align(b"AT", b"TA", &ScoringScheme::default()).unwrap();
    assert_eq!(canonical.score(), 1);
    assert_eq!(canonical.best().aligned_seq1, b"-AT");
    assert_eq!(canonical.best().aligned_seq2, b"TA-");

    let all = Aligner::default()
        .with_alignment_mode(AlignmentMode::Enumerate(10))
        .align(b"AT", b"TA")
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.alignments()[1].aligned_seq1, b"AT-");
    assert_eq!(all.alignments()[1].aligned_seq2, b"-TA");
}

#[test]
fn protein_sequences_align_as_opaque_tokens() {
    let result = align(
        b"MKTAYIAKQRQISITPDVQMK",
        b"mktayiakqrqlsitpdvqmk",
        &ScoringScheme::default(),
    )
    .unwrap();
    assert_eq!(result.score(), 20);
}

#[test]
fn configuration_errors_surface_before_work() {
    let err = ScoringScheme::new(0, 1, 0).unwrap_err();
    assert!(matches!(err, AlignerError::InvalidConfiguration(_)));

    let huge = ScoringScheme::new(i64::MAX, 0, 0).unwrap();
    let err = align(b"AA", b"AA", &huge).unwrap_err();
    assert!(matches!(err, AlignerError::InvalidConfiguration(_)));

    let config = AlignerConfig::default().with_max_cells(100);
    let err = Aligner::default()
        .with_config(config)
        .align(&[b'A'; 20], &[b'C'; 20])
        .unwrap_err();
    assert!(matches!(err, AlignerError::ResourceExceeded { cells: 441, limit: 100 }));
}

#[test]
fn concurrent_calls_share_one_engine() {
    let aligner = Aligner::new(ScoringScheme::new(2, -1, -2).unwrap());
    let expected = aligner.align(b"GATTACA", b"GCATGCU").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| aligner.align(b"GATTACA", b"GCATGCU").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
