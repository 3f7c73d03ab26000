//! Error types shared by the browsing core.
//!
//! Every non-fatal error leaves the session exactly as it was before the
//! failing call.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by word list loading, navigation and search.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The word list has no entries, so there is nothing to display.
    #[error("word list is empty")]
    EmptyCollection,

    /// A jump target outside `0..len`.
    #[error("index {index} is out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },

    /// No entry scored above the exclusion threshold.
    #[error("no entry matches {query:?}")]
    NoMatch { query: String },

    /// The word source could not be read.
    #[error("failed to load word list from {}", path.display())]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mode name that is not one of `normal`, `timer` or `autoplay`.
    #[error("unknown playback mode {0:?}")]
    InvalidMode(String),
}

pub type Result<T> = std::result::Result<T, BrowseError>;
