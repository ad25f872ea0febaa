//! Error taxonomy.
//!
//! The core is pure and total over well-formed input, so only two things can
//! go wrong: a matcher was configured in a way that can never match anything
//! meaningful (fatal, raised at construction time), or a caller asked to
//! resolve a span that belongs to no known grammar (recoverable; the caller
//! falls back to a generic full-text search).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid matcher setup, e.g. an empty statute-name set. Raised before
    /// any scan is attempted.
    #[error("matcher configuration error: {0}")]
    Configuration(String),

    /// The span matched no known citation grammar. Carries the raw text so
    /// the caller can build its own fallback search.
    #[error("citation matched no known grammar: {0}")]
    UnrecognizedCitation(String),
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}
