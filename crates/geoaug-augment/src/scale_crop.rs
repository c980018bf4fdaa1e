use geoaug_image::ImageError;
use geoaug_imgproc::{
    crop::{crop_image, CropOffset, CropSize},
    padding::{pad_to_size_with_offsets, Padding2D},
    SpatialImage,
};

use crate::debug::{DebugSink, NoopSink, ScaleCropStage};
use crate::intrinsics::{scale_crop_intrinsics, IntrinsicMatrix};

/// The result of [`scale_crop`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleCropOutput<I> {
    /// The augmented image, always of the requested crop size.
    pub image: I,
    /// The intrinsics of the augmented image, when intrinsics were given.
    pub intrinsics: Option<IntrinsicMatrix>,
    /// The padding added after the crop, zero when the crop was complete.
    pub padding: Padding2D,
}

/// Rescale an image, crop a window out of it and pad the window to the crop size.
///
/// The offset is applied to the rescaled image as is: callers sampling offsets
/// against the original geometry must scale them first. A window falling partly
/// outside of the rescaled image is zero padded, centred, up to `crop_size`.
///
/// When `k` is given, it is updated to `K' = Pad * Crop * Scale * K` so that it
/// describes the output image.
///
/// # Arguments
///
/// * `img` - The image to augment.
/// * `crop_size` - The size of the output.
/// * `offset` - The top-left corner of the window in the rescaled image.
/// * `scale_factor` - The rescale factor, finite and strictly positive.
/// * `k` - The optional intrinsics of `img`.
///
/// # Errors
///
/// Fails with [`ImageError::InvalidScaleFactor`] for an invalid factor and with
/// [`ImageError::UnsupportedType`] for images that cannot be resampled.
///
/// # Example
///
/// ```
/// use geoaug_augment::{intrinsics::IntrinsicMatrix, scale_crop};
/// use geoaug_image::DenseImage;
/// use geoaug_imgproc::crop::CropOffset;
/// use ndarray::Array3;
///
/// let image = DenseImage::from_array3(Array3::<f32>::zeros((100, 100, 3)));
/// let k = IntrinsicMatrix::new(80.0, 80.0, 50.0, 50.0);
///
/// let out = scale_crop(&image, 128usize, CropOffset::default(), 1.0, Some(&k)).unwrap();
///
/// assert_eq!(out.image.shape(), vec![128, 128, 3]);
/// assert_eq!((out.padding.top, out.padding.left), (14, 14));
/// assert_eq!(out.intrinsics.map(|k| k.cx()), Some(64.0));
/// ```
pub fn scale_crop<I: SpatialImage>(
    img: &I,
    crop_size: impl Into<CropSize>,
    offset: CropOffset,
    scale_factor: f64,
    k: Option<&IntrinsicMatrix>,
) -> Result<ScaleCropOutput<I>, ImageError> {
    scale_crop_with_sink(img, crop_size, offset, scale_factor, k, &mut NoopSink)
}

/// Same as [`scale_crop`], handing every intermediate image to `sink`.
pub fn scale_crop_with_sink<I, S>(
    img: &I,
    crop_size: impl Into<CropSize>,
    offset: CropOffset,
    scale_factor: f64,
    k: Option<&IntrinsicMatrix>,
    sink: &mut S,
) -> Result<ScaleCropOutput<I>, ImageError>
where
    I: SpatialImage,
    S: DebugSink<I> + ?Sized,
{
    let crop_size: CropSize = crop_size.into();
    let target = crop_size.image_size();
    sink.record(ScaleCropStage::Input, img);

    let scaled = img.rescale(scale_factor)?;
    log::debug!(
        "Rescaled {} by {} to {}",
        img.size(),
        scale_factor,
        scaled.size()
    );
    sink.record(ScaleCropStage::Scaled, &scaled);

    let cropped = crop_image(&scaled, target, offset)?;
    log::debug!(
        "Cropped {} at ({}, {}) to {}",
        target,
        offset.h_offset,
        offset.w_offset,
        cropped.size()
    );
    sink.record(ScaleCropStage::Cropped, &cropped);

    let size = cropped.size();
    let (image, padding) = if size.height < target.height || size.width < target.width {
        pad_to_size_with_offsets(&cropped, target, I::Pixel::default())?
    } else {
        (cropped, Padding2D::default())
    };
    log::debug!("Padded to {} with {:?}", image.size(), padding);
    sink.record(ScaleCropStage::Padded, &image);

    let intrinsics = k.map(|k| scale_crop_intrinsics(k, scale_factor, offset, &padding));

    Ok(ScaleCropOutput {
        image,
        intrinsics,
        padding,
    })
}
