use thiserror::Error;

/// Errors raised when opening or pulling from a partitioned stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The item list was empty at construction.
    #[error("corpus item list is empty")]
    EmptyCorpus,

    /// A zero batch size was requested.
    #[error("batch size must be positive")]
    InvalidBatchSize,

    /// A worker identity outside `[0, count)`, or an empty pool.
    #[error("worker id {id} is invalid for a pool of {count}")]
    InvalidWorker { id: usize, count: usize },

    /// The batch transform failed while decoding an item.
    #[error("batch transform failed: {0}")]
    Transform(#[from] frame_core::CorpusError),
}
