use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while preparing a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Annotation content that cannot be parsed, or an empty annotation.
    /// A single bad line fails the whole file; nothing is skipped silently.
    #[error("malformed annotation: {0}")]
    MalformedAnnotation(String),

    /// Annotation file absent for a recording. The driver reports this as a
    /// skip; it never aborts a run.
    #[error("no annotation file at {0}")]
    MissingAnnotation(PathBuf),

    /// Filesystem failure while reading or writing pipeline data.
    #[error("I/O failure for {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waveform codec failure (unreadable, unsupported or unwritable audio).
    #[error("waveform codec error for {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// Rejected framing parameters.
    #[error("invalid frame configuration: {0}")]
    InvalidConfig(String),
}
