use thiserror::Error;

/// Errors that can occur when configuring a render or writing its output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Bucket size must be at least 1 pixel")]
    ZeroBucketSize,

    #[error("Scene has no triangles to render")]
    EmptyScene,

    #[error("Image size {width}x{height} has no pixels")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image buffer is {actual} bytes, expected {expected} for the given size")]
    BufferSize { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
