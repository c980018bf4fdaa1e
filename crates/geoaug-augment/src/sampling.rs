//! Random sampling of views and crop windows.
//!
//! The random source is always passed in by the caller, so a seeded generator
//! gives reproducible augmentations.

use geoaug_imgproc::crop::{CropOffset, CropSize};
use rand::seq::SliceRandom;
use rand::Rng;

/// Minimum number of views kept by [`get_subset_views`] unless told otherwise.
pub const DEFAULT_MINIMUM_VIEWS: usize = 4;

/// Pick a random subset of the views of a multi-view capture.
///
/// When `minimum_views >= number_views` all the indices are returned in order.
/// Otherwise the indices are shuffled and the first `n` are kept, `n` being drawn
/// uniformly between `minimum_views` and `number_views` and rounded to the nearest
/// integer. The subset keeps the shuffled order.
///
/// # Example
///
/// ```
/// use geoaug_augment::sampling::get_subset_views;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
///
/// assert_eq!(get_subset_views(3, 4, &mut rng), vec![0, 1, 2]);
///
/// let views = get_subset_views(16, 4, &mut rng);
/// assert!(views.len() >= 4 && views.len() <= 16);
/// ```
pub fn get_subset_views<R: Rng>(
    number_views: usize,
    minimum_views: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut views: Vec<usize> = (0..number_views).collect();
    if minimum_views >= number_views {
        return views;
    }

    views.shuffle(rng);

    let spread = (number_views - minimum_views) as f64;
    let selected = (minimum_views as f64 + spread * rng.random::<f64>()).round_ties_even() as usize;
    views.truncate(selected.clamp(minimum_views, number_views));
    views
}

/// Draw a random top-left corner for a crop window inside an image.
///
/// Each offset is drawn uniformly from `[0, max(1, len - crop - 1))`. When the
/// image is not larger than the window plus one pixel on an axis, the offset on
/// that axis is 0 and the caller is expected to pad the result.
///
/// # Example
///
/// ```
/// use geoaug_augment::sampling::get_random_crop_offsets;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let offset = get_random_crop_offsets(128usize, 480, 640, &mut rng);
/// assert!(offset.h_offset + 128 <= 480);
/// assert!(offset.w_offset + 128 <= 640);
///
/// let offset = get_random_crop_offsets(128usize, 100, 100, &mut rng);
/// assert_eq!((offset.h_offset, offset.w_offset), (0, 0));
/// ```
pub fn get_random_crop_offsets<R: Rng>(
    crop_size: impl Into<CropSize>,
    height: usize,
    width: usize,
    rng: &mut R,
) -> CropOffset {
    let crop_size: CropSize = crop_size.into();
    let w_offset = sample_axis_offset(width, crop_size.width(), rng);
    let h_offset = sample_axis_offset(height, crop_size.height(), rng);
    CropOffset { h_offset, w_offset }
}

fn sample_axis_offset<R: Rng>(len: usize, crop: usize, rng: &mut R) -> usize {
    let upper = (len as i64 - crop as i64 - 1).max(1) as usize;
    rng.random_range(0..upper)
}
