#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for computer vision purposes.
pub mod image;

/// dense array image representation.
pub mod dense;

/// Error types for the image module.
pub mod error;

/// image basic operations.
pub mod ops;

pub use crate::dense::DenseImage;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
