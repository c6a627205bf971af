use std::io;
use std::path::PathBuf;

/// Failures while reading or writing game records.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read record {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write record {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Failures while turning an image path into a drawable texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode {path}: {source}")]
    Decode { path: String, source: image::ImageError },

    #[error("{path} has no pixels")]
    Empty { path: String },

    #[error("{path} is too large to upload ({width}x{height})")]
    TooLarge { path: String, width: u32, height: u32 },
}

/// Failures while starting the emulator.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("failed to queue launch in {path}: {source}")]
    Queue { path: PathBuf, source: io::Error },
}

/// Anything that can go wrong between picking a game and the emulator returning.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error(transparent)]
    Record(#[from] CatalogError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}
