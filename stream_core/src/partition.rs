//! Deterministic corpus partitioning.

/// One consumer among a pool of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerIdentity {
    /// Zero-based worker index, `< count`.
    pub id: usize,
    /// Number of workers sharing the corpus.
    pub count: usize,
}

/// Contiguous index range `[start, end)` over an ordered item list.
///
/// Partitions are a pure function of the list length and the worker
/// identity. Workers with distinct ids never overlap, and when the length
/// does not divide evenly the trailing remainder items are visited by no
/// worker at all; that truncation is part of the contract, not corrected
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusPartition {
    pub start: usize,
    pub end: usize,
}

impl CorpusPartition {
    /// Range for `worker` over `len` items; the whole list when unattached.
    ///
    /// `worker.count` must be non-zero; [`crate::PartitionedStream::open`]
    /// rejects the identity before this runs.
    pub fn compute(len: usize, worker: Option<WorkerIdentity>) -> Self {
        match worker {
            None => Self { start: 0, end: len },
            Some(WorkerIdentity { id, count }) => {
                let work_load = len / count;
                let start = id * work_load;
                Self {
                    start,
                    end: start + work_load,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unattached_covers_the_whole_list() {
        let partition = CorpusPartition::compute(7, None);
        assert_eq!(partition, CorpusPartition { start: 0, end: 7 });
    }

    #[test]
    fn ten_items_across_three_workers_leaves_the_last_unvisited() {
        let ranges: Vec<CorpusPartition> = (0..3)
            .map(|id| CorpusPartition::compute(10, Some(WorkerIdentity { id, count: 3 })))
            .collect();
        assert_eq!(ranges[0], CorpusPartition { start: 0, end: 3 });
        assert_eq!(ranges[1], CorpusPartition { start: 3, end: 6 });
        assert_eq!(ranges[2], CorpusPartition { start: 6, end: 9 });
        // Index 9 belongs to nobody.
        assert!(ranges.iter().all(|r| !(r.start..r.end).contains(&9)));
    }

    #[test]
    fn partitions_are_disjoint_and_in_bounds() {
        let len = 13;
        for count in 1..=5 {
            let mut seen = vec![false; len];
            for id in 0..count {
                let partition = CorpusPartition::compute(len, Some(WorkerIdentity { id, count }));
                assert!(partition.end <= len);
                for index in partition.start..partition.end {
                    assert!(!seen[index], "index {index} visited twice for count {count}");
                    seen[index] = true;
                }
            }
        }
    }

    #[test]
    fn recomputation_is_deterministic() {
        let worker = Some(WorkerIdentity { id: 2, count: 4 });
        assert_eq!(
            CorpusPartition::compute(100, worker),
            CorpusPartition::compute(100, worker)
        );
    }
}
