use geoaug_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use serde::{Deserialize, Serialize};

use crate::spatial::SpatialImage;

/// The size of a crop window.
///
/// A single scalar means a square window.
///
/// # Examples
///
/// ```
/// use geoaug_imgproc::crop::CropSize;
///
/// let square = CropSize::from(128usize);
/// assert_eq!((square.height(), square.width()), (128, 128));
///
/// let rect = CropSize::from((64usize, 32usize));
/// assert_eq!((rect.height(), rect.width()), (64, 32));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CropSize {
    /// A square window with the given side.
    Square(usize),
    /// A window with explicit height and width.
    Rect {
        /// Height of the window in pixels.
        height: usize,
        /// Width of the window in pixels.
        width: usize,
    },
}

impl CropSize {
    /// Height of the window in pixels.
    pub fn height(&self) -> usize {
        match *self {
            CropSize::Square(side) => side,
            CropSize::Rect { height, .. } => height,
        }
    }

    /// Width of the window in pixels.
    pub fn width(&self) -> usize {
        match *self {
            CropSize::Square(side) => side,
            CropSize::Rect { width, .. } => width,
        }
    }

    /// The window as an image size.
    pub fn image_size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl From<usize> for CropSize {
    fn from(side: usize) -> Self {
        CropSize::Square(side)
    }
}

/// Converts a `(height, width)` pair.
impl From<(usize, usize)> for CropSize {
    fn from((height, width): (usize, usize)) -> Self {
        CropSize::Rect { height, width }
    }
}

impl From<ImageSize> for CropSize {
    fn from(size: ImageSize) -> Self {
        CropSize::Rect {
            height: size.height,
            width: size.width,
        }
    }
}

/// Top-left corner of a crop window, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropOffset {
    /// Row of the top-left corner.
    pub h_offset: usize,
    /// Column of the top-left corner.
    pub w_offset: usize,
}

impl CropOffset {
    /// Create an offset from a row and a column.
    pub fn new(h_offset: usize, w_offset: usize) -> Self {
        Self { h_offset, w_offset }
    }
}

/// Compute the part of a crop window that lies inside an image.
///
/// A window reaching past the image is shrunk to the image border, and a window
/// starting past the border has a zero extent on that axis. The returned offset
/// is clamped accordingly.
///
/// # Examples
///
/// ```
/// use geoaug_image::ImageSize;
/// use geoaug_imgproc::crop::{clamp_window, CropOffset};
///
/// let image = ImageSize { width: 100, height: 100 };
/// let window = ImageSize { width: 128, height: 128 };
///
/// let (offset, size) = clamp_window(image, window, CropOffset::new(10, 0));
/// assert_eq!(offset, CropOffset::new(10, 0));
/// assert_eq!(size, ImageSize { width: 100, height: 90 });
/// ```
pub fn clamp_window(
    image_size: ImageSize,
    crop_size: ImageSize,
    offset: CropOffset,
) -> (CropOffset, ImageSize) {
    let h_offset = offset.h_offset.min(image_size.height);
    let w_offset = offset.w_offset.min(image_size.width);
    let size = ImageSize {
        width: crop_size.width.min(image_size.width - w_offset),
        height: crop_size.height.min(image_size.height - h_offset),
    };
    (CropOffset { h_offset, w_offset }, size)
}

/// Crop a window out of an image.
///
/// Returns the region `[h_offset .. h_offset + crop_height, w_offset .. w_offset + crop_width]`
/// with all its channels. The window is not required to fit: the part outside the
/// image is dropped and the result is smaller than `crop_size` (see [`clamp_window`]).
///
/// # Arguments
///
/// * `src` - The image to crop.
/// * `crop_size` - The size of the window.
/// * `offset` - The top-left corner of the window.
///
/// # Examples
///
/// ```rust
/// use geoaug_image::{Image, ImageSize};
/// use geoaug_imgproc::crop::{crop_image, CropOffset};
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let cropped = crop_image(&image, 2usize, CropOffset::new(1, 1)).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<I: SpatialImage>(
    src: &I,
    crop_size: impl Into<CropSize>,
    offset: CropOffset,
) -> Result<I, ImageError> {
    let crop_size: CropSize = crop_size.into();
    src.crop(crop_size.image_size(), offset)
}

/// Copy the window at `(x, y)` of `src` into `dst`, whose size gives the window size.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// The window must lie inside `src`.
pub fn copy_window<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.width() > src.width() || y + dst.height() > src.height() {
        return Err(ImageError::InvalidImageSize(
            x + dst.width(),
            y + dst.height(),
            src.width(),
            src.height(),
        ));
    }

    let dst_cols = dst.cols();
    if dst_cols == 0 || dst.rows() == 0 {
        return Ok(());
    }

    let src_cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src_cols * C + x * C;
            let src_slice = &src_data[offset..offset + dst_cols * C];

            // copy the slice to the destination
            dst_row.copy_from_slice(src_slice);
        });

    Ok(())
}
