//! post-view: flattens blog content-query edges into post views
//!
//! A content query hands back edges shaped like
//! `{ node: { frontmatter: { ..., thumbnail: { childImageSharp: { fluid } } } } }`.
//! Page templates want a flat record with `thumbnail` pointing straight at
//! the image. The [`mapper`] module does that reshaping; the rest of the
//! crate loads query results from disk and writes the mapped views.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod mapper;

pub use content::{ContentEdge, FixedImage, FluidImage, Frontmatter, PostView};
pub use error::MapError;
pub use mapper::{
    to_post, to_post_image_fixed, to_post_image_fluid, ImageKind, Mapper, ThumbnailPolicy,
};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog site: its configuration and resolved paths
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Query-result file or directory
    pub source_path: PathBuf,
    /// Output file for mapped posts
    pub output_path: PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already-built configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_path = base_dir.join(&config.source);
        let output_path = base_dir.join(&config.output);

        Self {
            config,
            base_dir,
            source_path,
            output_path,
        }
    }

    /// Mapper configured with the site's thumbnail policy
    pub fn mapper(&self) -> Mapper {
        Mapper::new(self.config.missing_thumbnail)
    }

    /// Load every edge under the source path.
    ///
    /// Broken files in a source directory are skipped, unless the site
    /// fails on missing thumbnails, in which case they fail the load too.
    pub fn load_edges(&self) -> Result<Vec<ContentEdge>> {
        self.load_edges_with(self.config.missing_thumbnail == ThumbnailPolicy::Fail)
    }

    /// Load every edge, failing on the first broken file when `strict`
    pub fn load_edges_with(&self, strict: bool) -> Result<Vec<ContentEdge>> {
        content::loader::EdgeLoader::new(&self.source_path)
            .strict(strict)
            .load_edges()
    }
}
