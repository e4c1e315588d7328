use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::debug;

use crate::error::LoadError;

const USER_AGENT: &str = "backdrop-palette/0.1.0 (https://github.com)";
const MAX_FETCH_BYTES: u64 = 5 * 1024 * 1024;

/// Where an image comes from. `Url` and `File` reach outside the process;
/// `Bytes` and `DataUri` are self-contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    File(PathBuf),
    Bytes(Vec<u8>),
    DataUri(String),
}

impl ImageSource {
    /// Classifies a locator string: http(s) URLs, `data:` URIs, everything
    /// else a filesystem path.
    pub fn locate(locator: &str) -> Self {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            ImageSource::Url(locator.to_string())
        } else if locator.starts_with("data:") {
            ImageSource::DataUri(locator.to_string())
        } else {
            ImageSource::File(PathBuf::from(locator))
        }
    }

    /// Resolves the source to raw encoded image bytes.
    pub fn load(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            ImageSource::Url(url) => fetch(url),
            ImageSource::File(path) => read_file(path),
            ImageSource::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(LoadError::EmptyBody);
                }
                Ok(bytes.clone())
            }
            ImageSource::DataUri(uri) => decode_data_uri(uri),
        }
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    debug!("fetching image from {url}");
    let resp = http_agent()
        .get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if resp.status() != 200 {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    if let Some(len) = resp.header("Content-Length") {
        if let Ok(n) = len.parse::<u64>() {
            if n > MAX_FETCH_BYTES {
                return Err(LoadError::TooLarge(n));
            }
        }
    }

    let mut bytes = Vec::new();
    resp.into_reader()
        .take(MAX_FETCH_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if bytes.is_empty() {
        return Err(LoadError::EmptyBody);
    }
    if bytes.len() as u64 > MAX_FETCH_BYTES {
        return Err(LoadError::TooLarge(bytes.len() as u64));
    }
    Ok(bytes)
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(LoadError::EmptyBody);
    }
    Ok(bytes)
}

// Only base64 payloads are supported; percent-encoded data URIs do not occur
// for binary image content.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = uri.strip_prefix("data:").ok_or(LoadError::DataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(LoadError::DataUri)?;
    if !meta.ends_with(";base64") {
        return Err(LoadError::DataUri);
    }
    let bytes = BASE64.decode(payload).map_err(|_| LoadError::DataUri)?;
    if bytes.is_empty() {
        return Err(LoadError::EmptyBody);
    }
    Ok(bytes)
}

fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(8))
        .build()
}
