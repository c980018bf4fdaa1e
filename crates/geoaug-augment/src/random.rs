use geoaug_image::ImageSize;
use geoaug_imgproc::{crop::CropOffset, crop::CropSize, resize::rescaled_size, SpatialImage};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::debug::{DebugSink, NoopSink};
use crate::error::AugmentError;
use crate::intrinsics::IntrinsicMatrix;
use crate::sampling::{get_random_crop_offsets, get_subset_views};
use crate::scale_crop::{scale_crop_with_sink, ScaleCropOutput};

/// Parameters of [`RandomScaleCrop`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomScaleCropParams {
    /// The size of the augmented images.
    pub crop_size: CropSize,
    /// The inclusive range the scale factor is drawn from, as `(min, max)`.
    pub scale_range: (f64, f64),
    /// The seed of the random generator, `None` to seed from the OS.
    pub random_seed: Option<u64>,
}

impl Default for RandomScaleCropParams {
    fn default() -> Self {
        Self {
            crop_size: CropSize::Square(256),
            scale_range: (1.0, 1.0),
            random_seed: None,
        }
    }
}

/// Random rescale and crop of images, with their intrinsics.
///
/// Owns its random generator so that a seeded instance replays the same
/// sequence of augmentations.
///
/// # Example
///
/// ```
/// use geoaug_augment::random::{RandomScaleCrop, RandomScaleCropParams};
/// use geoaug_image::DenseImage;
/// use ndarray::Array3;
///
/// let mut augment = RandomScaleCrop::new(RandomScaleCropParams {
///     crop_size: 64usize.into(),
///     scale_range: (0.5, 1.5),
///     random_seed: Some(0),
/// })
/// .unwrap();
///
/// let image = DenseImage::from_array3(Array3::<f32>::zeros((120, 160, 3)));
/// let out = augment.apply(&image, None).unwrap();
///
/// assert_eq!(out.image.shape(), vec![64, 64, 3]);
/// ```
#[derive(Debug)]
pub struct RandomScaleCrop {
    params: RandomScaleCropParams,
    rng: StdRng,
}

impl RandomScaleCrop {
    /// Create the augmentation.
    ///
    /// # Errors
    ///
    /// The scale range must be finite with `0 < min <= max`.
    pub fn new(params: RandomScaleCropParams) -> Result<Self, AugmentError> {
        let (min, max) = params.scale_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(AugmentError::InvalidScaleRange(min, max));
        }

        let rng = match params.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self { params, rng })
    }

    /// The parameters of the augmentation.
    pub fn params(&self) -> &RandomScaleCropParams {
        &self.params
    }

    /// Draw a scale factor.
    pub fn sample_scale(&mut self) -> f64 {
        let (min, max) = self.params.scale_range;
        if min == max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Draw a subset of views, see [`get_subset_views`].
    pub fn sample_views(&mut self, number_views: usize, minimum_views: usize) -> Vec<usize> {
        get_subset_views(number_views, minimum_views, &mut self.rng)
    }

    /// Draw a crop offset for an image of `size` rescaled by `scale_factor`.
    pub fn sample_offset(&mut self, size: ImageSize, scale_factor: f64) -> CropOffset {
        let scaled = rescaled_size(size, scale_factor);
        get_random_crop_offsets(
            self.params.crop_size,
            scaled.height,
            scaled.width,
            &mut self.rng,
        )
    }

    /// Augment an image and its optional intrinsics.
    ///
    /// A scale factor is drawn, then an offset inside the rescaled image, and the
    /// image goes through [`crate::scale_crop`].
    pub fn apply<I: SpatialImage>(
        &mut self,
        img: &I,
        k: Option<&IntrinsicMatrix>,
    ) -> Result<ScaleCropOutput<I>, AugmentError> {
        self.apply_with_sink(img, k, &mut NoopSink)
    }

    /// Same as [`RandomScaleCrop::apply`], handing every intermediate image to `sink`.
    pub fn apply_with_sink<I, S>(
        &mut self,
        img: &I,
        k: Option<&IntrinsicMatrix>,
        sink: &mut S,
    ) -> Result<ScaleCropOutput<I>, AugmentError>
    where
        I: SpatialImage,
        S: DebugSink<I> + ?Sized,
    {
        let scale_factor = self.sample_scale();
        let offset = self.sample_offset(img.size(), scale_factor);
        log::debug!(
            "Sampled scale {} and offset ({}, {})",
            scale_factor,
            offset.h_offset,
            offset.w_offset
        );

        let out = scale_crop_with_sink(
            img,
            self.params.crop_size,
            offset,
            scale_factor,
            k,
            sink,
        )?;

        Ok(out)
    }
}
