//! Image descriptors produced by the external image pipeline
//!
//! These are opaque to us. Fluid and fixed images keep every key they were
//! given, in order, with `null`s and unknown keys (`tracedSVG`,
//! `presentationWidth`, ...) intact; the accessors are read-only views.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `thumbnail` container of a front-matter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_image_sharp: Option<ChildImageSharp>,
}

/// Processed variants of one source image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildImageSharp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<FixedImage>,
}

/// Responsive image that stretches to its container
///
/// Usual keys: `src`, `base64`, `aspectRatio`, `srcSet`, `sizes`,
/// `srcWebp`, `srcSetWebp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FluidImage(IndexMap<String, Value>);

/// Image rendered at a fixed width and height
///
/// Usual keys: `width`, `height`, `src`, `srcSet`, `base64`, `srcWebp`,
/// `srcSetWebp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedImage(IndexMap<String, Value>);

macro_rules! image_fields {
    ($ty:ident) => {
        impl $ty {
            /// Raw value of a key, `null` included
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// All keys in the order they were received
            pub fn fields(&self) -> &IndexMap<String, Value> {
                &self.0
            }

            pub fn src(&self) -> Option<&str> {
                self.str_field("src")
            }

            pub fn src_set(&self) -> Option<&str> {
                self.str_field("srcSet")
            }

            pub fn base64(&self) -> Option<&str> {
                self.str_field("base64")
            }

            pub fn src_webp(&self) -> Option<&str> {
                self.str_field("srcWebp")
            }

            pub fn src_set_webp(&self) -> Option<&str> {
                self.str_field("srcSetWebp")
            }

            fn str_field(&self, key: &str) -> Option<&str> {
                self.0.get(key).and_then(Value::as_str)
            }

            fn num_field(&self, key: &str) -> Option<f64> {
                self.0.get(key).and_then(Value::as_f64)
            }
        }

        impl From<IndexMap<String, Value>> for $ty {
            fn from(fields: IndexMap<String, Value>) -> Self {
                Self(fields)
            }
        }

        impl FromIterator<(String, Value)> for $ty {
            fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

image_fields!(FluidImage);
image_fields!(FixedImage);

impl FluidImage {
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.num_field("aspectRatio")
    }

    pub fn sizes(&self) -> Option<&str> {
        self.str_field("sizes")
    }
}

impl FixedImage {
    pub fn width(&self) -> Option<f64> {
        self.num_field("width")
    }

    pub fn height(&self) -> Option<f64> {
        self.num_field("height")
    }
}

/// Image kind that never holds a value, for views without a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoImage {}
