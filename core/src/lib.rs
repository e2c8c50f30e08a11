//! jumpmotion-core
//!
//! Jump-target scanning, label assignment and keystroke narrowing for
//! easymotion-style caret navigation, independent of any editor.
//!
//! Public API:
//! - `TextView` - What the engine reads from the host editor
//! - `scan` - Word and punctuation boundary scanner
//! - `rank` - Sequential or caret-relative candidate ordering
//! - `LabelTree` - SC-Tree prefix-free label assignment
//! - `JumpSession` - One scan-to-resolution lifecycle
//! - `JumpEngine` - Session management and key event processing
//! - `LabelRenderer` / `LabelPool` - Rendering collaborator and in-memory pool
//! - `Config` - Alphabet, ranking and style settings
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{JumpError, Result};

pub mod view;
pub use view::{Rect, StrView, TextView};

pub mod candidate;
pub use candidate::Candidate;

pub mod scanner;
pub use scanner::{scan, CharClass, MIN_SPACING};

pub mod ranker;
pub use ranker::{effective_caret, rank, RankingMode, MAX_CARET_SENSITIVITY};

pub mod alphabet;
pub use alphabet::{Alphabet, DEFAULT_ALPHABET};

pub mod label_tree;
pub use label_tree::{Assignment, LabelNode, LabelTree, NodeId};

pub mod style;
pub use style::{Color, LabelColors, LabelStyle, ParseColorError, StyleField};

pub mod render;
pub use render::{LabelEntity, LabelHandle, LabelPool, LabelRenderer, RenderError};

pub mod jump_table;
pub use jump_table::{JumpAssociation, JumpTable, Narrowing};

pub mod session;
pub use session::{ConsumeResult, JumpSession, JumpTarget, SessionState};

pub mod engine;
pub use engine::{JumpEngine, KeyEvent, KeyResult};

/// Jump navigation settings.
///
/// Every field has a default, so a partial TOML file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Label keys in preference order. Earlier keys label nearer targets.
    pub alphabet: String,
    pub ranking_mode: RankingMode,
    /// Caret quantization bin minus one; 0 disables binning
    pub caret_sensitivity: usize,
    pub style: LabelStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            ranking_mode: RankingMode::Sequential,
            caret_sensitivity: 0,
            style: LabelStyle::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| JumpError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| JumpError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the alphabet is usable.
    pub fn validate(&self) -> Result<()> {
        Alphabet::new(&self.alphabet).map(|_| ())
    }

    // ========== Label Keys ==========

    /// Replace the label alphabet.
    ///
    /// # Example
    /// ```
    /// # use jumpmotion_core::Config;
    /// let mut config = Config::default();
    /// config.set_alphabet("fjdksla;").unwrap(); // home row only
    /// assert!(config.set_alphabet("aa").is_err());
    /// assert_eq!(config.get_alphabet(), "fjdksla;");
    /// ```
    pub fn set_alphabet(&mut self, keys: &str) -> Result<()> {
        Alphabet::new(keys)?;
        self.alphabet = keys.to_string();
        Ok(())
    }

    pub fn get_alphabet(&self) -> &str {
        &self.alphabet
    }

    /// Index of `ch` in the alphabet, or `None` if it is not a label key.
    pub fn label_key_index(&self, ch: char) -> Option<usize> {
        self.alphabet.chars().position(|c| c == ch)
    }

    // ========== Ranking ==========

    pub fn set_ranking_mode(&mut self, mode: RankingMode) {
        self.ranking_mode = mode;
    }

    pub fn get_ranking_mode(&self) -> RankingMode {
        self.ranking_mode
    }

    /// Set the caret sensitivity, clamped to [`MAX_CARET_SENSITIVITY`].
    pub fn set_caret_sensitivity(&mut self, sensitivity: usize) {
        self.caret_sensitivity = sensitivity.min(MAX_CARET_SENSITIVITY);
    }

    pub fn get_caret_sensitivity(&self) -> usize {
        self.caret_sensitivity
    }
}
