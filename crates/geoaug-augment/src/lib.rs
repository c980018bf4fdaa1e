#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the augmentation module.
pub mod error;

/// random sampling of views and crop windows.
pub mod sampling;

/// camera intrinsics and their update under pixel grid transforms.
pub mod intrinsics;

/// inspection of the intermediate images.
pub mod debug;

/// rescale, crop and pad as a single augmentation.
pub mod scale_crop;

/// seeded random scale-crop augmentation.
pub mod random;

pub use crate::error::AugmentError;
pub use crate::intrinsics::IntrinsicMatrix;
pub use crate::random::{RandomScaleCrop, RandomScaleCropParams};
pub use crate::scale_crop::{scale_crop, scale_crop_with_sink, ScaleCropOutput};
