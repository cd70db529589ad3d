//! Post mapper - reshapes content edges into flat post views
//!
//! An edge nests its image three levels deep
//! (`node.frontmatter.thumbnail.childImageSharp.fluid`). Templates want the
//! front-matter fields at the top level and `thumbnail` pointing straight at
//! the image, so every mapper here copies the front-matter and swaps the
//! thumbnail container for one of its variants. Inputs are never modified.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::content::{
    ChildImageSharp, ContentEdge, FixedImage, FluidImage, Frontmatter, NoImage, Post,
    PostImageFixed, PostImageFluid, PostView,
};
use crate::error::MapError;

/// What to do with a post whose thumbnail (or the requested variant) is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailPolicy {
    /// Map the post without a `thumbnail` field
    #[default]
    Omit,
    /// Reject the post
    Fail,
}

impl FromStr for ThumbnailPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "omit" => Ok(Self::Omit),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown thumbnail policy: {}. Available: omit, fail",
                other
            )),
        }
    }
}

/// Which image variant ends up in `thumbnail`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    #[default]
    Fluid,
    Fixed,
    /// Drop the thumbnail entirely
    None,
}

impl ImageKind {
    /// Field path below `thumbnail` that this kind reads
    pub fn path(self) -> Option<&'static str> {
        match self {
            ImageKind::Fluid => Some(FLUID_PATH),
            ImageKind::Fixed => Some(FIXED_PATH),
            ImageKind::None => None,
        }
    }
}

impl FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fluid" => Ok(Self::Fluid),
            "fixed" => Ok(Self::Fixed),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown image kind: {}. Available: fluid, fixed, none",
                other
            )),
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageKind::Fluid => "fluid",
            ImageKind::Fixed => "fixed",
            ImageKind::None => "none",
        };
        f.write_str(name)
    }
}

const SHARP_PATH: &str = "childImageSharp";
const FLUID_PATH: &str = "childImageSharp.fluid";
const FIXED_PATH: &str = "childImageSharp.fixed";

/// Map an edge to a view whose thumbnail is the fluid image.
///
/// A post without a thumbnail maps to a view without one.
pub fn to_post_image_fluid(edge: &ContentEdge) -> PostImageFluid {
    let fm = edge.frontmatter();
    flatten(fm, fluid_of(fm).ok().cloned())
}

/// Map an edge to a view whose thumbnail is the fixed-size image
pub fn to_post_image_fixed(edge: &ContentEdge) -> PostImageFixed {
    let fm = edge.frontmatter();
    flatten(fm, fixed_of(fm).ok().cloned())
}

/// Map an edge to a view without any thumbnail
pub fn to_post(edge: &ContentEdge) -> Post {
    flatten::<NoImage>(edge.frontmatter(), None)
}

/// A mapped post of any image kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MappedPost {
    Fluid(PostImageFluid),
    Fixed(PostImageFixed),
    Plain(Post),
}

impl MappedPost {
    pub fn slug(&self) -> &str {
        match self {
            MappedPost::Fluid(p) => &p.slug,
            MappedPost::Fixed(p) => &p.slug,
            MappedPost::Plain(p) => &p.slug,
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        match self {
            MappedPost::Fluid(p) => p.has_thumbnail(),
            MappedPost::Fixed(p) => p.has_thumbnail(),
            MappedPost::Plain(_) => false,
        }
    }
}

/// Mapper with an explicit missing-thumbnail policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Mapper {
    policy: ThumbnailPolicy,
}

impl Mapper {
    pub fn new(policy: ThumbnailPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ThumbnailPolicy {
        self.policy
    }

    /// Map an edge, extracting `thumbnail.childImageSharp.fluid`
    pub fn image_fluid(&self, edge: &ContentEdge) -> Result<PostImageFluid, MapError> {
        let fm = edge.frontmatter();
        self.apply(fm, fluid_of(fm))
    }

    /// Map an edge, extracting `thumbnail.childImageSharp.fixed`
    pub fn image_fixed(&self, edge: &ContentEdge) -> Result<PostImageFixed, MapError> {
        let fm = edge.frontmatter();
        self.apply(fm, fixed_of(fm))
    }

    /// Map an edge and drop its thumbnail. Never fails.
    pub fn plain(&self, edge: &ContentEdge) -> Post {
        to_post(edge)
    }

    /// Map an edge to the requested image kind
    pub fn map(&self, edge: &ContentEdge, kind: ImageKind) -> Result<MappedPost, MapError> {
        Ok(match kind {
            ImageKind::Fluid => MappedPost::Fluid(self.image_fluid(edge)?),
            ImageKind::Fixed => MappedPost::Fixed(self.image_fixed(edge)?),
            ImageKind::None => MappedPost::Plain(self.plain(edge)),
        })
    }

    /// Map every edge in order, stopping at the first failure
    pub fn map_edges(
        &self,
        edges: &[ContentEdge],
        kind: ImageKind,
    ) -> Result<Vec<MappedPost>, MapError> {
        let posts = edges
            .iter()
            .map(|edge| self.map(edge, kind))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Mapped {} posts ({} thumbnails)", posts.len(), kind);
        Ok(posts)
    }

    fn apply<I: Clone>(
        &self,
        fm: &Frontmatter,
        found: Result<&I, MapError>,
    ) -> Result<PostView<I>, MapError> {
        match (found, self.policy) {
            (Ok(image), _) => Ok(flatten(fm, Some(image.clone()))),
            (Err(e), ThumbnailPolicy::Omit) => {
                tracing::debug!("{}, mapping without thumbnail", e);
                Ok(flatten(fm, None))
            }
            (Err(e), ThumbnailPolicy::Fail) => Err(e),
        }
    }
}

fn child_image_sharp(fm: &Frontmatter) -> Result<&ChildImageSharp, MapError> {
    let thumbnail = fm
        .thumbnail
        .as_ref()
        .ok_or_else(|| MapError::MissingThumbnail {
            slug: fm.slug.clone(),
        })?;

    thumbnail
        .child_image_sharp
        .as_ref()
        .ok_or_else(|| MapError::MissingImage {
            slug: fm.slug.clone(),
            path: SHARP_PATH,
        })
}

fn fluid_of(fm: &Frontmatter) -> Result<&FluidImage, MapError> {
    child_image_sharp(fm)?
        .fluid
        .as_ref()
        .ok_or_else(|| MapError::MissingImage {
            slug: fm.slug.clone(),
            path: FLUID_PATH,
        })
}

fn fixed_of(fm: &Frontmatter) -> Result<&FixedImage, MapError> {
    child_image_sharp(fm)?
        .fixed
        .as_ref()
        .ok_or_else(|| MapError::MissingImage {
            slug: fm.slug.clone(),
            path: FIXED_PATH,
        })
}

fn flatten<I>(fm: &Frontmatter, thumbnail: Option<I>) -> PostView<I> {
    PostView {
        title: fm.title.clone(),
        description: fm.description.clone(),
        published: fm.published.clone(),
        slug: fm.slug.clone(),
        tags: fm.tags.clone(),
        modified: fm.modified.clone(),
        recommended: fm.recommended.clone(),
        thumbnail,
        extra: fm.extra.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fluid_json() -> Value {
        json!({
            "src": "/static/abc/cover.png",
            "base64": "data:image/png;base64,iVBORw0KGgo=",
            "aspectRatio": 1.7777777777777777,
            "srcSet": "/static/abc/200/cover.png 200w,\n/static/abc/400/cover.png 400w",
            "sizes": "(max-width: 800px) 100vw, 800px",
            "srcWebp": "/static/abc/cover.webp",
            "srcSetWebp": "/static/abc/200/cover.webp 200w"
        })
    }

    fn edge(frontmatter: Value) -> ContentEdge {
        serde_json::from_value(json!({ "node": { "frontmatter": frontmatter } })).unwrap()
    }

    fn fixture() -> ContentEdge {
        edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": ["tag1", "tag2"],
            "thumbnail": { "childImageSharp": { "fluid": fluid_json() } }
        }))
    }

    #[test]
    fn test_to_post_image_fluid() {
        let post = to_post_image_fluid(&fixture());

        let expected = json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": ["tag1", "tag2"],
            "thumbnail": fluid_json()
        });
        assert_eq!(serde_json::to_value(&post).unwrap(), expected);
    }

    #[test]
    fn test_thumbnail_is_the_fluid_image() {
        let edge = fixture();
        let post = to_post_image_fluid(&edge);

        let source = edge
            .node
            .frontmatter
            .thumbnail
            .as_ref()
            .and_then(|t| t.child_image_sharp.as_ref())
            .and_then(|s| s.fluid.as_ref());
        assert_eq!(post.thumbnail.as_ref(), source);
    }

    #[test]
    fn test_fluid_passes_through_unknown_keys_and_nulls() {
        let fluid = json!({
            "src": "/a.png",
            "base64": null,
            "aspectRatio": 1.5,
            "srcSet": "/a.png 1x",
            "sizes": "100vw",
            "tracedSVG": "data:image/svg+xml,%3csvg%3e",
            "presentationWidth": 800,
            "originalImg": "/static/original.png"
        });
        let post = to_post_image_fluid(&edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": [],
            "thumbnail": { "childImageSharp": { "fluid": fluid.clone() } }
        })));

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["thumbnail"], fluid);
        assert_eq!(value["thumbnail"]["base64"], Value::Null);
    }

    #[test]
    fn test_partial_fluid_maps_under_fail_policy() {
        let partial = json!({ "src": "/a.png", "aspectRatio": 1.5 });
        let edge = edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "partial",
            "tags": [],
            "thumbnail": { "childImageSharp": { "fluid": partial.clone() } }
        }));

        let post = Mapper::new(ThumbnailPolicy::Fail).image_fluid(&edge).unwrap();
        let thumb = post.thumbnail.unwrap();
        assert!(thumb.src_set().is_none());
        assert_eq!(serde_json::to_value(&thumb).unwrap(), partial);
    }

    #[test]
    fn test_output_has_no_child_image_sharp_key() {
        let json = serde_json::to_string(&to_post_image_fluid(&fixture())).unwrap();
        assert!(!json.contains("childImageSharp"));
    }

    #[test]
    fn test_scalar_fields_unchanged() {
        let edge = edge(json!({
            "title": "Ünïcode & <html>",
            "description": "  padded  ",
            "published": "2019-01-01T10:00:00.000Z",
            "slug": "Not-A-Slug",
            "tags": ["zeta", "alpha", "zeta"],
            "thumbnail": { "childImageSharp": { "fluid": fluid_json() } }
        }));
        let post = to_post_image_fluid(&edge);
        let fm = edge.frontmatter();

        assert_eq!(post.title, fm.title);
        assert_eq!(post.description, "  padded  ");
        assert_eq!(post.published, "2019-01-01T10:00:00.000Z");
        assert_eq!(post.slug, "Not-A-Slug");
        assert_eq!(post.tags, vec!["zeta", "alpha", "zeta"]);
    }

    #[test]
    fn test_empty_tags_pass_through() {
        let post = to_post_image_fluid(&edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": [],
            "thumbnail": { "childImageSharp": { "fluid": fluid_json() } }
        })));

        assert!(post.tags.is_empty());
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["tags"], json!([]));
    }

    #[test]
    fn test_mapping_is_pure() {
        let edge = fixture();
        let before = edge.clone();

        let first = to_post_image_fluid(&edge);
        let second = to_post_image_fluid(&edge);

        assert_eq!(first, second);
        assert_eq!(edge, before);
    }

    #[test]
    fn test_optional_and_extra_fields_pass_through() {
        let post = to_post_image_fluid(&edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "modified": "2019-02-01",
            "slug": "title",
            "tags": ["tag1"],
            "recommended": ["other-post"],
            "series": { "name": "rust", "part": 2 },
            "thumbnail": { "childImageSharp": { "fluid": fluid_json() } }
        })));

        assert_eq!(post.modified.as_deref(), Some("2019-02-01"));
        assert_eq!(post.recommended, Some(vec!["other-post".to_string()]));
        assert_eq!(post.extra["series"], json!({ "name": "rust", "part": 2 }));
        assert!(!post.extra.contains_key("thumbnail"));
    }

    #[test]
    fn test_missing_thumbnail_is_omitted() {
        let post = to_post_image_fluid(&edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": ["tag1"]
        })));

        assert!(post.thumbnail.is_none());
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("thumbnail").is_none());
    }

    #[test]
    fn test_fail_policy_reports_missing_thumbnail() {
        let mapper = Mapper::new(ThumbnailPolicy::Fail);
        let err = mapper
            .image_fluid(&edge(json!({
                "title": "Title",
                "description": "Description",
                "published": "2019-01-01",
                "slug": "no-cover",
                "tags": []
            })))
            .unwrap_err();

        assert_eq!(
            err,
            MapError::MissingThumbnail {
                slug: "no-cover".to_string()
            }
        );
        assert_eq!(err.to_string(), "post `no-cover` has no thumbnail");
    }

    #[test]
    fn test_fail_policy_reports_missing_path() {
        let mapper = Mapper::new(ThumbnailPolicy::Fail);

        let no_sharp = edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "raw-image",
            "tags": [],
            "thumbnail": {}
        }));
        assert_eq!(
            mapper.image_fluid(&no_sharp).unwrap_err(),
            MapError::MissingImage {
                slug: "raw-image".to_string(),
                path: "childImageSharp"
            }
        );

        // fluid present but fixed requested
        let err = mapper.image_fixed(&fixture()).unwrap_err();
        assert_eq!(err.slug(), "title");
        assert_eq!(
            err.to_string(),
            "post `title` thumbnail is missing `childImageSharp.fixed`"
        );
    }

    #[test]
    fn test_omit_policy_matches_free_function() {
        let mapper = Mapper::default();
        let edge = fixture();
        assert_eq!(mapper.image_fluid(&edge).unwrap(), to_post_image_fluid(&edge));

        let fixed = mapper.image_fixed(&edge).unwrap();
        assert!(fixed.thumbnail.is_none());
        assert_eq!(fixed.title, "Title");
    }

    #[test]
    fn test_to_post_image_fixed() {
        let post = to_post_image_fixed(&edge(json!({
            "title": "Title",
            "description": "Description",
            "published": "2019-01-01",
            "slug": "title",
            "tags": ["tag1"],
            "thumbnail": { "childImageSharp": { "fixed": {
                "width": 300,
                "height": 150,
                "src": "/static/small.png",
                "srcSet": "/static/small.png 1x,\n/static/small@2x.png 2x"
            } } }
        })));

        let thumb = post.thumbnail.unwrap();
        assert_eq!(thumb.width(), Some(300.0));
        assert_eq!(thumb.height(), Some(150.0));
        assert_eq!(thumb.src(), Some("/static/small.png"));
    }

    #[test]
    fn test_to_post_drops_thumbnail() {
        let post = to_post(&fixture());
        assert!(!post.has_thumbnail());

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Title",
                "description": "Description",
                "published": "2019-01-01",
                "slug": "title",
                "tags": ["tag1", "tag2"]
            })
        );
    }

    #[test]
    fn test_map_edges_keeps_order() {
        let second = edge(json!({
            "title": "Second",
            "description": "",
            "published": "2018-01-01",
            "slug": "second",
            "tags": []
        }));
        let edges = vec![fixture(), second];

        let posts = Mapper::default()
            .map_edges(&edges, ImageKind::Fluid)
            .unwrap();
        let slugs: Vec<_> = posts.iter().map(MappedPost::slug).collect();
        assert_eq!(slugs, vec!["title", "second"]);
        assert!(posts[0].has_thumbnail());
        assert!(!posts[1].has_thumbnail());

        let value = serde_json::to_value(&posts).unwrap();
        assert_eq!(value[0]["thumbnail"], fluid_json());
    }

    #[test]
    fn test_map_edges_stops_at_first_error() {
        let bare = |slug: &str| {
            edge(json!({
                "title": slug,
                "description": "",
                "published": "2018-01-01",
                "slug": slug,
                "tags": []
            }))
        };
        let edges = vec![fixture(), bare("first-bad"), bare("second-bad")];

        let err = Mapper::new(ThumbnailPolicy::Fail)
            .map_edges(&edges, ImageKind::Fluid)
            .unwrap_err();
        assert_eq!(err.slug(), "first-bad");

        // without an image kind nothing can be missing
        let posts = Mapper::new(ThumbnailPolicy::Fail)
            .map_edges(&edges, ImageKind::None)
            .unwrap();
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn test_parse_policy_and_kind() {
        assert_eq!("fail".parse::<ThumbnailPolicy>(), Ok(ThumbnailPolicy::Fail));
        assert!("drop".parse::<ThumbnailPolicy>().is_err());
        assert_eq!("fixed".parse::<ImageKind>(), Ok(ImageKind::Fixed));
        assert_eq!(ImageKind::Fluid.path(), Some("childImageSharp.fluid"));
        assert_eq!(ImageKind::None.path(), None);

        let policy: ThumbnailPolicy = serde_yaml::from_str("omit").unwrap();
        assert_eq!(policy, ThumbnailPolicy::Omit);
    }
}
