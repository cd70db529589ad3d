//! Edge loader - reads content-query results from the source path

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentEdge;

/// Loads content edges from a query-result file or a directory of them
pub struct EdgeLoader {
    source: PathBuf,
    strict: bool,
}

impl EdgeLoader {
    /// Create a new edge loader
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            strict: false,
        }
    }

    /// In strict mode a broken file inside a directory fails the whole load
    /// instead of being skipped
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Load all edges, in file-name order when the source is a directory
    pub fn load_edges(&self) -> Result<Vec<ContentEdge>> {
        if !self.source.exists() {
            bail!("Source {:?} does not exist", self.source);
        }

        if self.source.is_file() {
            let edges = load_file(&self.source)?;
            tracing::info!("Loaded {} edges from {:?}", edges.len(), self.source);
            return Ok(edges);
        }

        let mut edges = Vec::new();
        let mut files = 0;

        for entry in WalkDir::new(&self.source)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && Format::of(path).is_some() {
                match load_file(path) {
                    Ok(found) => {
                        files += 1;
                        edges.extend(found);
                    }
                    Err(e) if self.strict => return Err(e),
                    Err(e) => {
                        tracing::warn!("Failed to load {:?}: {:#}", path, e);
                    }
                }
            }
        }

        tracing::info!("Loaded {} edges from {} files", edges.len(), files);

        Ok(edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Format::Json),
            Some("yml") | Some("yaml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

fn load_file(path: &Path) -> Result<Vec<ContentEdge>> {
    let format = Format::of(path).unwrap_or(Format::Json);
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    parse_document(&content, format).with_context(|| format!("Invalid query result in {:?}", path))
}

fn parse_document(content: &str, format: Format) -> Result<Vec<ContentEdge>> {
    let value: Value = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };

    locate_edges(value)?
        .into_iter()
        .enumerate()
        .map(|(i, edge)| {
            serde_json::from_value(edge).map_err(|e| anyhow!("Edge #{}: {}", i, e))
        })
        .collect()
}

/// Accepts `[...]`, `{"edges": [...]}` or `{"data": {"<connection>": {"edges": [...]}}}`
fn locate_edges(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(edges) => Ok(edges),
        Value::Object(mut doc) => {
            if let Some(edges) = doc.remove("edges") {
                return edge_list(edges);
            }

            let Some(Value::Object(data)) = doc.remove("data") else {
                bail!("No edges found, expected a list, an `edges` key or a `data` object");
            };

            let mut edges = Vec::new();
            for (name, connection) in data {
                match connection {
                    Value::Object(mut connection) => match connection.remove("edges") {
                        Some(found) => edges.extend(edge_list(found)?),
                        None => tracing::debug!("Connection `{}` has no edges", name),
                    },
                    _ => tracing::debug!("Skipping non-object `{}` in data", name),
                }
            }
            Ok(edges)
        }
        other => bail!("Expected a list of edges, found {}", kind_of(&other)),
    }
}

fn edge_list(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(edges) => Ok(edges),
        Value::Null => Ok(Vec::new()),
        other => bail!("`edges` must be a list, found {}", kind_of(&other)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
