#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use geoaug_image as image;

#[doc(inline)]
pub use geoaug_imgproc as imgproc;

#[doc(inline)]
pub use geoaug_augment as augment;
