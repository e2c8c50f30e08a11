//! Error types for session building and configuration.
//!
//! Narrowing never fails: a key that matches nothing is reported as
//! `ConsumeResult::NoMatch`, not as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a jump session or handling configuration.
#[derive(Debug, Error)]
pub enum JumpError {
    /// The alphabet cannot produce a prefix-free labelling for this many
    /// candidates (empty alphabet, or a single key with more than one target).
    #[error("alphabet of {size} key(s) cannot label {candidates} candidate(s)")]
    AlphabetTooSmall { size: usize, candidates: usize },

    /// The same key appears twice in the alphabet.
    #[error("duplicate key {0:?} in label alphabet")]
    DuplicateKey(char),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, JumpError>;
