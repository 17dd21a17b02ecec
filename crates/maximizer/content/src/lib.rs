//! Data-driven inputs for the maximizer.
//!
//! This crate reads the data a host hands to `maximizer-core`:
//! - Item, familiar and synergy catalogs (RON)
//! - Character snapshots: stats, inventory, familiars, current gear (RON)
//! - Search budget configuration (TOML)
//!
//! Content is consumed through [`maximizer_core::CatalogOracle`] and never
//! mutated by the maximizer.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogFile, CatalogLoader, CharacterLoader, ConfigLoader, ContentFactory, LoadResult,
};
