//! jumpmotion crate root
//!
//! Terminal front end for `jumpmotion-core`: a TOML configuration layer over
//! the core `Config`, and a plain-text renderer for the label overlay.
//!
//! Public API exported here:
//! - `CliConfig` from `config`
//! - `render_overlay`, `session_report`, `jump_report` from `overlay`

pub mod config;
pub mod overlay;

pub use config::CliConfig;
pub use overlay::{jump_report, render_overlay, session_report, JumpReport, SessionReport, TargetReport};

// Convenience re-exports for callers driving the engine directly.
pub use jumpmotion_core::{
    Config, JumpEngine, KeyEvent, KeyResult, LabelPool, RankingMode, StrView, TextView,
};
