//! Content factory for loading maximizer inputs from a data directory.

use std::path::{Path, PathBuf};

use maximizer_core::{CatalogSnapshot, CharacterState, MaximizerConfig};

use crate::loaders::{CatalogLoader, CharacterLoader, ConfigLoader, LoadResult};

/// Content factory that loads all maximizer content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── catalog.ron
/// └── characters/
///     ├── seal_clubber.ron
///     └── fresh.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load search configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<MaximizerConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(MaximizerConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path)
    }

    /// Load a character from `characters/{name}.ron`, checked against `catalog`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the character file (without `.ron` extension)
    pub fn load_character(&self, name: &str, catalog: &CatalogSnapshot) -> LoadResult<CharacterState> {
        let path = self.data_dir.join("characters").join(format!("{}.ron", name));
        CharacterLoader::load_checked(&path, catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
