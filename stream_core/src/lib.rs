//! Deterministic partitioned batch streaming for training consumers.
//!
//! A fixed, ordered item list is split into per-worker index ranges by
//! pure arithmetic, so independent consumers need no coordination at
//! runtime: determinism substitutes for it. Items are decoded only when a
//! batch is pulled, which bounds peak memory by one batch regardless of
//! corpus size.

pub mod error;
pub mod mel;
pub mod partition;
pub mod stream;

pub use error::StreamError;
pub use mel::{mel_from_samples, spectrogram_transform, MelConfig, MelFrames};
pub use partition::{CorpusPartition, WorkerIdentity};
pub use stream::{Batch, PartitionedStream};
