//! The ad type registry.
//!
//! `AdTypeRegistry` is an explicit instance owned by the host process and
//! handed to the sync-preview builder as an `AdTypeSource`. There is no
//! process-wide registry: tests build their own and call `reset()` for
//! isolation.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use adsync_contracts::{
    ad_type::{AdTypeDefinition, AdTypeKey},
    error::{AdsyncError, AdsyncResult},
    platform::{ContentCategory, Platform},
};
use adsync_core::traits::AdTypeSource;

use crate::catalog;

/// TOML document shape for `load_toml_str`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    ad_types: Vec<AdTypeDefinition>,
}

/// Ad type definitions keyed by (platform, id).
///
/// Iteration order is the key order: platform, then id.
#[derive(Debug, Default, Clone)]
pub struct AdTypeRegistry {
    types: BTreeMap<AdTypeKey, AdTypeDefinition>,
    initialized: bool,
}

impl AdTypeRegistry {
    /// An empty registry. Call `initialize()` to load the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in catalogue.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.initialize();
        registry
    }

    /// Register the built-in catalogue once.
    ///
    /// A built-in never replaces a definition already registered under its
    /// key, whether that was registered before or after the first call.
    /// Repeated calls are no-ops.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!(ad_types = self.types.len(), "registry already initialized");
            return;
        }
        for definition in catalog::builtin() {
            let key = definition.key();
            if self.types.contains_key(&key) {
                debug!(ad_type = %key, "built-in skipped, key already registered");
                continue;
            }
            self.types.insert(key, definition);
        }
        self.initialized = true;
        info!(ad_types = self.types.len(), "ad type registry initialized");
    }

    /// Clear every definition, then register the built-ins again.
    pub fn reset(&mut self) {
        self.clear();
        self.initialize();
    }

    /// Register `definition`, replacing any definition with the same key.
    ///
    /// Returns the replaced definition.
    pub fn register(&mut self, definition: AdTypeDefinition) -> Option<AdTypeDefinition> {
        let key = definition.key();
        let previous = self.types.insert(key.clone(), definition);
        if previous.is_some() {
            debug!(ad_type = %key, "ad type definition replaced");
        }
        previous
    }

    /// Parse `[[ad_types]]` entries from TOML and register each one.
    ///
    /// Returns `AdsyncError::ConfigError` if the TOML is malformed. Nothing
    /// is registered unless the whole document parses.
    pub fn load_toml_str(&mut self, s: &str) -> AdsyncResult<usize> {
        let doc: CatalogDocument = toml::from_str(s).map_err(|e| AdsyncError::ConfigError {
            reason: format!("failed to parse ad type TOML: {}", e),
        })?;
        let count = doc.ad_types.len();
        for definition in doc.ad_types {
            self.register(definition);
        }
        debug!(count, "ad types loaded from TOML");
        Ok(count)
    }

    /// Read the file at `path` and register the ad types it declares.
    pub fn load_file(&mut self, path: &Path) -> AdsyncResult<usize> {
        let contents = std::fs::read_to_string(path).map_err(|e| AdsyncError::ConfigError {
            reason: format!("failed to read ad type file '{}': {}", path.display(), e),
        })?;
        self.load_toml_str(&contents)
    }

    pub fn get(&self, platform: Platform, id: &str) -> Option<&AdTypeDefinition> {
        self.types.get(&AdTypeKey::new(platform, id))
    }

    /// Like `get`, but a missing type is an error.
    pub fn require(&self, platform: Platform, id: &str) -> AdsyncResult<&AdTypeDefinition> {
        self.get(platform, id).ok_or_else(|| AdsyncError::UnknownAdType {
            platform: platform.to_string(),
            ad_type: id.to_string(),
        })
    }

    pub fn by_platform(&self, platform: Platform) -> Vec<&AdTypeDefinition> {
        self.types
            .values()
            .filter(|d| d.platform == platform)
            .collect()
    }

    /// Definitions of `category` across every platform.
    pub fn by_category(&self, category: ContentCategory) -> Vec<&AdTypeDefinition> {
        self.types
            .values()
            .filter(|d| d.category == category)
            .collect()
    }

    fn of(&self, platform: Platform, category: ContentCategory) -> Vec<&AdTypeDefinition> {
        self.types
            .values()
            .filter(|d| d.platform == platform && d.category == category)
            .collect()
    }

    pub fn paid_types(&self, platform: Platform) -> Vec<&AdTypeDefinition> {
        self.of(platform, ContentCategory::Paid)
    }

    pub fn organic_types(&self, platform: Platform) -> Vec<&AdTypeDefinition> {
        self.of(platform, ContentCategory::Organic)
    }

    pub fn promoted_types(&self, platform: Platform) -> Vec<&AdTypeDefinition> {
        self.of(platform, ContentCategory::Promoted)
    }

    pub fn all(&self) -> Vec<&AdTypeDefinition> {
        self.types.values().collect()
    }

    /// Remove every definition. The next `initialize()` loads the built-ins.
    pub fn clear(&mut self) {
        self.types.clear();
        self.initialized = false;
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl AdTypeSource for AdTypeRegistry {
    fn get(&self, platform: Platform, id: &str) -> Option<&AdTypeDefinition> {
        AdTypeRegistry::get(self, platform, id)
    }
}
