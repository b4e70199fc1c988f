//! Document loading from files and stdin.
//!
//! Input may be JSON or YAML, optionally gzip-compressed. Files are
//! classified by extension (`.yaml`/`.yml` are YAML, anything else JSON, with
//! a trailing `.gz` stripped first). Stdin has no name, so gzip is detected by
//! its magic bytes and the content is tried as JSON first and YAML second.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use crate::document::parser::{parse_json_str, parse_yaml_str};
use crate::document::value::Value;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    /// JSON, falling back to YAML.
    Detect,
}

impl Format {
    /// Picks the format from a file name, ignoring a trailing `.gz`.
    ///
    /// ```
    /// use peekjson::file::loader::Format;
    ///
    /// assert_eq!(Format::from_path("a.json"), Format::Json);
    /// assert_eq!(Format::from_path("a.yml.gz"), Format::Yaml);
    /// assert_eq!(Format::from_path("data"), Format::Json);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        let base = name.strip_suffix(".gz").unwrap_or(&name);
        if base.ends_with(".yaml") || base.ends_with(".yml") {
            Format::Yaml
        } else {
            Format::Json
        }
    }
}

/// Loads and parses a document from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use peekjson::file::loader::load_file;
///
/// let document = load_file("data.json.gz").unwrap();
/// ```
///
/// # Errors
///
/// Fails if the file cannot be read, is corrupt gzip, is not UTF-8, or does
/// not parse in its format.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = load_bytes(&bytes, Format::from_path(path))
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded document");
    Ok(document)
}

/// Loads and parses a document from standard input.
pub fn load_from_stdin() -> Result<Value> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    let document = load_bytes(&buffer, Format::Detect).context("Failed to load stdin")?;
    tracing::info!(bytes = buffer.len(), "loaded document from stdin");
    Ok(document)
}

/// Parses raw bytes, decompressing them first if they are gzip.
pub fn load_bytes(bytes: &[u8], format: Format) -> Result<Value> {
    let content = if bytes.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(bytes)?
    } else {
        String::from_utf8(bytes.to_vec()).context("Input is not valid UTF-8")?
    };

    match format {
        Format::Json => parse_json_str(&content).context("Failed to parse JSON"),
        Format::Yaml => parse_yaml_str(&content).context("Failed to parse YAML"),
        Format::Detect => match parse_json_str(&content) {
            Ok(document) => Ok(document),
            Err(json_err) => {
                tracing::debug!(error = %json_err, "input is not JSON, trying YAML");
                parse_yaml_str(&content).context("Input is neither valid JSON nor valid YAML")
            }
        },
    }
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzip input - it may be corrupted")?;
    Ok(content)
}
