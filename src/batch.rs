use std::thread;

use crossbeam_channel::{bounded, unbounded};
use log::debug;

use crate::{AlignerError, Aligner, AlignmentResult, Result};

/// Aligns many independent pairs on a pool of worker threads.
///
/// Each worker owns nothing but a shared reference to the engine; results are
/// returned in input order whatever order the workers finish in.
pub struct BatchAligner {
    aligner: Aligner,
    workers: usize,
}

impl BatchAligner {
    pub fn new(aligner: Aligner) -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { aligner, workers }
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(AlignerError::InvalidConfiguration(
                "worker count must be at least 1".to_string(),
            ));
        }
        self.workers = workers;
        Ok(self)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// One result per pair; a failing pair does not stop the others.
    pub fn align_all<A, B>(&self, pairs: &[(A, B)]) -> Vec<Result<AlignmentResult>>
    where
        A: AsRef<[u8]> + Sync,
        B: AsRef<[u8]> + Sync,
    {
        if pairs.is_empty() {
            return Vec::new();
        }

        let workers = self.workers.min(pairs.len());
        debug!("aligning {} pairs on {} workers", pairs.len(), workers);

        let (work_tx, work_rx) = bounded::<usize>(workers);
        let (result_tx, result_rx) = unbounded();

        thread::scope(|scope| {
            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let aligner = &self.aligner;
                scope.spawn(move || {
                    while let Ok(index) = work_rx.recv() {
                        let (a, b) = &pairs[index];
                        let result = aligner.align(a.as_ref(), b.as_ref());
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            // Workers hold the only remaining handles, so the channels close
            // once the queue is drained.
            drop(result_tx);

            for index in 0..pairs.len() {
                if work_tx.send(index).is_err() {
                    break;
                }
            }
            drop(work_tx);
        });

        // The scope has joined every worker, so each index arrived exactly once.
        let mut tagged: Vec<(usize, Result<AlignmentResult>)> = result_rx.iter().collect();
        tagged.sort_unstable_by_key(|(index, _)| *index);
        tagged.into_iter().map(|(_, result)| result).collect()
    }

    /// Like `align_all` but fails on the first error in input order.
    pub fn try_align_all<A, B>(&self, pairs: &[(A, B)]) -> Result<Vec<AlignmentResult>>
    where
        A: AsRef<[u8]> + Sync,
        B: AsRef<[u8]> + Sync,
    {
        self.align_all(pairs).into_iter().collect()
    }
}
