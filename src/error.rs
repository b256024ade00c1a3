use thiserror::Error;

/// Errors surfaced by the capture, inference and persistence layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("camera error: {0}")]
    Camera(#[from] nokhwa::NokhwaError),

    #[error("no native capture backend available")]
    NoBackend,

    #[error("inference error: {0}")]
    Inference(#[from] ort::OrtError),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("malformed hand sample: expected 21 keypoints, got {0}")]
    MalformedSample(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
