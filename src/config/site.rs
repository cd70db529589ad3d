//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::mapper::{ImageKind, ThumbnailPolicy};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Query-result file or directory, relative to the base directory
    pub source: String,
    /// Where mapped posts are written, relative to the base directory
    pub output: String,

    // Mapping
    pub image: ImageKind,
    pub missing_thumbnail: ThumbnailPolicy,

    // Output
    pub pretty: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: "data".to_string(),
            output: "public/posts.json".to_string(),
            image: ImageKind::Fluid,
            missing_thumbnail: ThumbnailPolicy::Omit,
            pretty: true,
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}
