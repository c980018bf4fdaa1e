#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// spatial capabilities shared by the image representations.
pub mod spatial;

/// image cropping module.
pub mod crop;

/// image padding module.
pub mod padding;

/// image filtering module.
pub mod filter;

/// utility functions for resizing images.
pub mod resize;

pub use spatial::SpatialImage;
