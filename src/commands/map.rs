//! Map query results to post views and write them out

use anyhow::{Context, Result};
use std::fs;

use crate::mapper::{ImageKind, MappedPost};
use crate::Site;

/// Map every edge and write the views to the configured output
pub fn run(site: &Site, to_stdout: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = map_site(site)?;
    let json = to_json(&posts, site.config.pretty)?;

    if to_stdout {
        println!("{}", json);
        return Ok(());
    }

    if let Some(parent) = site.output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&site.output_path, json)
        .with_context(|| format!("Failed to write {:?}", site.output_path))?;

    let duration = start.elapsed();
    tracing::info!(
        "Wrote {} posts to {:?} in {:.2}s",
        posts.len(),
        site.output_path,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Load the site's edges and map them with its image kind and policy
pub fn map_site(site: &Site) -> Result<Vec<MappedPost>> {
    let edges = site.load_edges()?;
    let kind = site.config.image;
    let posts = site.mapper().map_edges(&edges, kind)?;

    if kind != ImageKind::None {
        let bare = posts.iter().filter(|p| !p.has_thumbnail()).count();
        if bare > 0 {
            tracing::warn!("{} of {} posts have no {} thumbnail", bare, posts.len(), kind);
        }
    }

    Ok(posts)
}

/// Serialize mapped posts as a JSON array
pub fn to_json(posts: &[MappedPost], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(posts)?
    } else {
        serde_json::to_string(posts)?
    };
    Ok(json)
}
