//! Lazy, forward-only batch stream over a partitioned corpus.
//!
//! Opening a stream validates its inputs and fixes the index range; a
//! batch is transformed only when pulled. The stream cannot be rewound;
//! re-opening with the same inputs recomputes the same partition and
//! yields the same batch sequence. Dropping the stream is its shutdown
//! protocol: every pull is self-contained, so no state outlives the value.

use std::marker::PhantomData;

use crate::error::StreamError;
use crate::partition::{CorpusPartition, WorkerIdentity};

/// One fixed-arity batch. `None` slots pad a short final group and must be
/// treated as absent by consumers.
pub type Batch<U> = Vec<Option<U>>;

/// Pull-based stream of transformed item batches.
pub struct PartitionedStream<T, U, F> {
    items: Vec<T>,
    partition: CorpusPartition,
    batch_size: usize,
    cursor: usize,
    transform: F,
    marker: PhantomData<fn() -> U>,
}

impl<T, U, F> std::fmt::Debug for PartitionedStream<T, U, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedStream")
            .field("partition", &self.partition)
            .field("batch_size", &self.batch_size)
            .field("cursor", &self.cursor)
            .field("transform", &"<fn>")
            .finish()
    }
}

impl<T, U, F> PartitionedStream<T, U, F>
where
    F: FnMut(&T) -> Result<U, StreamError>,
{
    /// Open a stream over `items`, decoding each pulled item with
    /// `transform`.
    ///
    /// Unattached (`worker == None`), the stream's domain is the whole
    /// list; attached, it is the worker's contiguous partition. All
    /// validation happens here, eagerly.
    pub fn open(
        items: Vec<T>,
        batch_size: usize,
        worker: Option<WorkerIdentity>,
        transform: F,
    ) -> Result<Self, StreamError> {
        if items.is_empty() {
            return Err(StreamError::EmptyCorpus);
        }
        if batch_size == 0 {
            return Err(StreamError::InvalidBatchSize);
        }
        if let Some(WorkerIdentity { id, count }) = worker {
            if count == 0 || id >= count {
                return Err(StreamError::InvalidWorker { id, count });
            }
        }

        let partition = CorpusPartition::compute(items.len(), worker);
        Ok(Self {
            cursor: partition.start,
            items,
            partition,
            batch_size,
            transform,
            marker: PhantomData,
        })
    }

    /// The index range this stream will visit.
    pub fn partition(&self) -> CorpusPartition {
        self.partition
    }

    /// Adapt the pull iterator into an async stream of batches for
    /// consumers that suspend at the I/O point of each pull.
    pub fn into_batch_stream(
        self,
    ) -> impl futures_core::Stream<Item = Result<Batch<U>, StreamError>> {
        async_stream::stream! {
            for batch in self {
                yield batch;
            }
        }
    }
}

impl<T, U, F> Iterator for PartitionedStream<T, U, F>
where
    F: FnMut(&T) -> Result<U, StreamError>,
{
    type Item = Result<Batch<U>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.partition.end {
            return None;
        }
        let batch_end = (self.cursor + self.batch_size).min(self.partition.end);

        let mut batch: Batch<U> = Vec::with_capacity(self.batch_size);
        for index in self.cursor..batch_end {
            match (self.transform)(&self.items[index]) {
                Ok(decoded) => batch.push(Some(decoded)),
                Err(error) => {
                    // Single attempt: the batch that hit the failure is
                    // lost, later batches are unaffected.
                    self.cursor = batch_end;
                    return Some(Err(error));
                }
            }
        }
        self.cursor = batch_end;

        batch.resize_with(self.batch_size, || None);
        Some(Ok(batch))
    }
}
