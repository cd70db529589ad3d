//! Check query results for posts that won't map cleanly

use anyhow::Result;
use std::collections::HashSet;
use std::fmt;

use crate::content::ContentEdge;
use crate::error::MapError;
use crate::mapper::{ImageKind, Mapper, ThumbnailPolicy};
use crate::Site;

/// A problem found in one post
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// The requested thumbnail variant can't be extracted
    Thumbnail(MapError),
    /// The slug is not in slug form
    Slug { slug: String, expected: String },
    /// Another post already uses this slug
    DuplicateSlug(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Thumbnail(e) => write!(f, "{}", e),
            Problem::Slug { slug, expected } => {
                write!(f, "slug `{}` is not URL-friendly (expected `{}`)", slug, expected)
            }
            Problem::DuplicateSlug(slug) => write!(f, "slug `{}` is used more than once", slug),
        }
    }
}

/// Check every edge and fail if any problem was found
pub fn run(site: &Site) -> Result<()> {
    let edges = site.load_edges_with(true)?;
    let problems = find_problems(&edges, site.config.image);

    if problems.is_empty() {
        println!("Checked {} posts, no problems found", edges.len());
        return Ok(());
    }

    for problem in &problems {
        println!("  {}", problem);
    }
    anyhow::bail!(
        "Found {} problems in {} posts",
        problems.len(),
        edges.len()
    );
}

/// Collect problems in edge order
pub fn find_problems(edges: &[ContentEdge], kind: ImageKind) -> Vec<Problem> {
    let strict = Mapper::new(ThumbnailPolicy::Fail);
    let mut seen = HashSet::new();
    let mut problems = Vec::new();

    for edge in edges {
        let slug = &edge.frontmatter().slug;

        if let Err(e) = strict.map(edge, kind) {
            problems.push(Problem::Thumbnail(e));
        }

        let expected = slug::slugify(slug);
        if &expected != slug {
            problems.push(Problem::Slug {
                slug: slug.clone(),
                expected,
            });
        }

        if !seen.insert(slug.as_str()) {
            problems.push(Problem::DuplicateSlug(slug.clone()));
        }
    }

    tracing::debug!("Checked {} edges, {} problems", edges.len(), problems.len());
    problems
}
