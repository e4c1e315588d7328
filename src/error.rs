use std::path::PathBuf;

use thiserror::Error;

/// The image source could not be loaded or decoded. The extraction that
/// triggered it produces no palette.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request for {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("image body exceeds {0} bytes")]
    TooLarge(u64),

    #[error("empty image body")]
    EmptyBody,

    #[error("unreadable image file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed data uri")]
    DataUri,

    #[error("undecodable image data: {0}")]
    Decode(#[from] image::ImageError),
}

/// No usable pixel surface could be produced for sampling.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("decoded image has no pixel area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("sample surface {width}x{height} is not addressable")]
    SurfaceTooLarge { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}
