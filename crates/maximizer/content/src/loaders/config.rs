//! Search configuration loader.

use std::path::Path;

use maximizer_core::MaximizerConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for maximizer configuration from TOML files.
///
/// Omitted keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing MaximizerConfig
    pub fn load(path: &Path) -> LoadResult<MaximizerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MaximizerConfig> {
        let config: MaximizerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.group_fanout == 0 {
            anyhow::bail!("group_fanout must be at least 1");
        }
        if config.score_epsilon.is_nan() || config.score_epsilon < 0.0 {
            anyhow::bail!("score_epsilon must be a non-negative number");
        }
        Ok(config)
    }
}
