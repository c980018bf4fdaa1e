/// An error type for the image containers and the spatial operations on them.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the image representation does not support the requested operation.
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    /// Error when an array does not have rank 2 (H, W) or rank 3 (H, W, C).
    #[error("Invalid image dimension: expected 2 or 3 axes, got {0}")]
    InvalidDimension(usize),

    /// Error when shape is not valid.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid.
    #[error("Invalid image size ({0}, {1}), expected ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a scale factor is not a finite positive number.
    #[error("Invalid scale factor {0}, expected a finite value > 0")]
    InvalidScaleFactor(f64),

    /// Error when the pixel data cannot be cast to the requested type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
