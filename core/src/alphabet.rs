//! Validated label alphabet.

use crate::error::{JumpError, Result};

/// Default keys, ordered for keyboard reach.
pub const DEFAULT_ALPHABET: &str = "asdghklqwertyuiopzxcvbnmfj;";

/// An ordered, non-empty set of distinct label keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    keys: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from `keys`, rejecting empty input and duplicates.
    pub fn new(keys: &str) -> Result<Self> {
        let mut seen = Vec::new();
        for key in keys.chars() {
            if seen.contains(&key) {
                return Err(JumpError::DuplicateKey(key));
            }
            seen.push(key);
        }
        if seen.is_empty() {
            return Err(JumpError::AlphabetTooSmall {
                size: 0,
                candidates: 0,
            });
        }
        Ok(Self { keys: seen })
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: char) -> bool {
        self.keys.contains(&key)
    }

    /// Index of `key` in the alphabet.
    pub fn index_of(&self, key: char) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            keys: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}
