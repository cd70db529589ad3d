//! Content module - query edges, front-matter, images and post views

mod edge;
mod frontmatter;
mod image;
pub mod loader;
mod post;

pub use edge::{ContentEdge, Node};
pub use frontmatter::Frontmatter;
pub use image::{ChildImageSharp, FixedImage, FluidImage, ImageContainer, NoImage};
pub use post::{sort_newest_first, Post, PostImageFixed, PostImageFluid, PostView};
