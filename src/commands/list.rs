//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::{sort_newest_first, Post};
use crate::mapper::to_post;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = load_posts(site)?;
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {}", post_line(post));
            }
        }
        "tag" | "tags" => {
            let tags = count_tags(&load_posts(site)?);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// One listing line; posts whose date can't be parsed are sorted last and marked
pub fn post_line(post: &Post) -> String {
    let undated = if post.published_date().is_none() {
        " (undated)"
    } else {
        ""
    };
    format!(
        "{}{} - {} [{}]",
        post.published, undated, post.title, post.slug
    )
}

/// Posts without thumbnails, newest first
pub fn load_posts(site: &Site) -> Result<Vec<Post>> {
    let mut posts: Vec<Post> = site.load_edges()?.iter().map(to_post).collect();
    sort_newest_first(&mut posts);
    Ok(posts)
}

/// Tag counts, most used first; ties keep first-seen order
pub fn count_tags(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: IndexMap<String, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1));
    tags
}
