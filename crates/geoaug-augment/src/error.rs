use geoaug_image::ImageError;

/// An error type for the augmentation module.
#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error when the range of scale factors is empty or not strictly positive.
    #[error("Invalid scale range [{0}, {1}], expected 0 < min <= max")]
    InvalidScaleRange(f64, f64),
}
