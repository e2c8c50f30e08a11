use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Terminal front-end configuration that extends the core `Config`.
///
/// This configuration includes:
/// - All jump options from `jumpmotion_core::Config` (flattened via serde)
/// - Viewport height used when no `--lines` is given
/// - Label pool capacity
/// - Character cell size fed to `StrView`
///
/// # Example
///
/// ```rust
/// use jumpmotion::CliConfig;
///
/// let config = CliConfig::from_toml_str("alphabet = \"fjdk\"\nviewport_lines = 10\n").unwrap();
/// assert_eq!(config.viewport_lines, 10);
/// assert_eq!(config.base().get_alphabet(), "fjdk");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Alphabet, ranking and label style
    #[serde(flatten)]
    pub base: jumpmotion_core::Config,

    pub viewport_lines: usize,
    pub pool_capacity: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base: jumpmotion_core::Config::default(),
            viewport_lines: 40,
            pool_capacity: 1024,
            cell_width: 1.0,
            cell_height: 1.0,
        }
    }
}

impl CliConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.base.validate()?;
        if config.viewport_lines == 0 {
            anyhow::bail!("viewport_lines must be at least 1");
        }
        Ok(config)
    }

    /// Convert this config into the core config for `JumpEngine::new()`.
    pub fn into_base(self) -> jumpmotion_core::Config {
        self.base
    }

    pub fn base(&self) -> &jumpmotion_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut jumpmotion_core::Config {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpmotion_core::RankingMode;

    #[test]
    fn test_flattened_fields() {
        let config = CliConfig::from_toml_str(
            "ranking_mode = \"caret-relative\"\npool_capacity = 8\n",
        )
        .unwrap();
        assert_eq!(config.pool_capacity, 8);
        assert_eq!(config.base().get_ranking_mode(), RankingMode::CaretRelative);
        assert_eq!(config.viewport_lines, 40);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(CliConfig::from_toml_str("viewport_lines = 0\n").is_err());
        assert!(CliConfig::from_toml_str("alphabet = \"xx\"\n").is_err());
    }
}
