//! Flattened post view handed to page templates

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter::parse_date_string;
use super::{FixedImage, FluidImage, NoImage};

/// A post as templates see it: front-matter fields with the thumbnail
/// unwrapped to a single image variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView<I = FluidImage> {
    /// Post title
    pub title: String,

    /// Short summary
    pub description: String,

    /// Publication date, as written in the source
    pub published: String,

    /// URL-friendly name
    pub slug: String,

    /// Post tags, in source order
    pub tags: Vec<String>,

    /// Last modification date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    /// Slugs of related posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<Vec<String>>,

    /// The extracted image, absent when the post has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<I>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Post view with a fluid thumbnail
pub type PostImageFluid = PostView<FluidImage>;

/// Post view with a fixed-size thumbnail
pub type PostImageFixed = PostView<FixedImage>;

/// Post view that never carries a thumbnail
pub type Post = PostView<NoImage>;

impl<I> PostView<I> {
    /// Parse `published` for ordering; the string itself is left alone
    pub fn published_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.published)
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

/// Sort views newest first; undated posts go last, ties keep their order
pub fn sort_newest_first<I>(posts: &mut [PostView<I>]) {
    posts.sort_by_key(|p| std::cmp::Reverse(p.published_date()));
}
