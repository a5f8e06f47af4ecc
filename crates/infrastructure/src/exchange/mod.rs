//! Collection import and export.
//!
//! Export writes the whole collection as JSON or YAML. Import reads either
//! format but keeps only the `requests` list; the name comes from the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use apitester_application::ports::FileSystem;
use apitester_domain::{Collection, SavedRequest};
use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::serialization::{SerializationError, from_json, to_json_stable};

/// Errors raised while importing or exporting a collection.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("Unsupported file format: {0}")]
    UnsupportedFileFormat(String),

    /// The file could not be read or written.
    #[error("{path}: {message}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// JSON encoding or decoding failed.
    #[error(transparent)]
    Json(#[from] SerializationError),

    /// YAML encoding or decoding failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The target collection name is not usable.
    #[error("Invalid collection name: {0}")]
    InvalidName(String),
}

/// Supported exchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeFormat {
    /// Pretty JSON, the native collection layout.
    #[default]
    Json,
    /// Block-style YAML.
    Yaml,
}

impl ExchangeFormat {
    /// File extension used for default export paths.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::UnsupportedFileFormat` for anything other
    /// than `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self, ExchangeError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ExchangeError::UnsupportedFileFormat(
                path.display().to_string(),
            )),
        }
    }

    /// Encodes a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(self, collection: &Collection) -> Result<String, ExchangeError> {
        Ok(match self {
            Self::Json => to_json_stable(collection)?,
            Self::Yaml => {
                let tree = serde_json::to_value(collection).map_err(SerializationError::from)?;
                serde_yaml::to_string(&yaml_value(&tree))?
            }
        })
    }

    /// Decodes the requests of a collection file.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid for this format.
    pub fn decode_requests(self, content: &str) -> Result<Vec<SavedRequest>, ExchangeError> {
        let file: ImportedFile = match self {
            Self::Json => from_json(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(file.requests.unwrap_or_default())
    }
}

/// Rebuilds a JSON tree as YAML.
///
/// `serde_json::Number` serializes as a private wrapper struct when it keeps
/// its source text, so numbers are converted by hand.
fn yaml_value(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => yaml_number(n),
        Value::String(s) => s.clone().into(),
        Value::Array(items) => serde_yaml::Value::Sequence(items.iter().map(yaml_value).collect()),
        Value::Object(map) => serde_yaml::Value::Mapping(
            map.iter()
                .map(|(key, item)| (key.clone().into(), yaml_value(item)))
                .collect(),
        ),
    }
}

fn yaml_number(n: &Number) -> serde_yaml::Value {
    if let Some(i) = n.as_i64() {
        i.into()
    } else if let Some(u) = n.as_u64() {
        u.into()
    } else if let Some(f) = n.as_f64() {
        f.into()
    } else {
        n.to_string().into()
    }
}

impl fmt::Display for ExchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Only `requests` is read; other top-level keys are ignored.
#[derive(Deserialize)]
struct ImportedFile {
    #[serde(default)]
    requests: Option<Vec<SavedRequest>>,
}

/// Writes `collection` to `path` in the given format. Returns the path.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub async fn export_collection<F: FileSystem>(
    fs: &F,
    collection: &Collection,
    format: ExchangeFormat,
    path: &Path,
) -> Result<(), ExchangeError> {
    let content = format.encode(collection)?;
    fs.write_file(path, content.as_bytes())
        .await
        .map_err(|e| ExchangeError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), %format, "collection exported");
    Ok(())
}

/// Reads a collection file and names the result `name`.
///
/// The format is chosen from the file extension before anything is read.
///
/// # Errors
///
/// Returns an error for an unsupported extension, an unreadable file,
/// malformed content, or an invalid name.
pub async fn import_collection<F: FileSystem>(
    fs: &F,
    path: &Path,
    name: &str,
) -> Result<Collection, ExchangeError> {
    let format = ExchangeFormat::from_path(path)?;
    let content = fs
        .read_file_string(path)
        .await
        .map_err(|e| ExchangeError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut collection =
        Collection::new(name).map_err(|e| ExchangeError::InvalidName(e.to_string()))?;
    for request in format.decode_requests(&content)? {
        collection.push(request);
    }
    debug!(path = %path.display(), %format, requests = collection.len(), "collection imported");
    Ok(collection)
}
