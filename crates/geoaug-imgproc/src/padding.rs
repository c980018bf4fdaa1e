use geoaug_image::{Image, ImageError, ImageSize};
use serde::{Deserialize, Serialize};

use crate::spatial::SpatialImage;

/// Canvas size used when no output size is given.
pub const DEFAULT_OUTPUT_SIZE: ImageSize = ImageSize {
    width: 256,
    height: 256,
};

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Compute the padding that centres an image of `size` on a canvas of at least `output_size`.
    ///
    /// Only axes strictly smaller than the target are padded. The extra pixel of an
    /// odd split goes to the bottom / right side.
    ///
    /// # Example
    /// ```rust
    /// use geoaug_image::ImageSize;
    /// use geoaug_imgproc::padding::Padding2D;
    ///
    /// let padding = Padding2D::to_reach(
    ///     ImageSize { width: 5, height: 300 },
    ///     ImageSize { width: 8, height: 256 },
    /// );
    ///
    /// assert_eq!(padding, Padding2D { top: 0, bottom: 0, left: 1, right: 2 });
    /// ```
    pub fn to_reach(size: ImageSize, output_size: ImageSize) -> Self {
        let (top, bottom) = split(size.height, output_size.height);
        let (left, right) = split(size.width, output_size.width);
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Whether no side is padded.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The size of an image of `size` after applying this padding.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Arguments
    /// - `old_size`: The original image size before padding.
    /// - `new_size`: The resulting image size after padding.
    ///
    /// # Example
    /// ```rust
    /// use geoaug_image::ImageSize;
    /// use geoaug_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

// (leading, trailing) amounts to grow `len` to `target`
fn split(len: usize, target: usize) -> (usize, usize) {
    if len >= target {
        return (0, 0);
    }
    let total = target - len;
    let leading = total / 2;
    (leading, total - leading)
}

/// Pad an image with a constant value so that it is at least `output_size`.
///
/// The image is centred on the new canvas. Axes that are already large enough are
/// left untouched and channels are never padded.
///
/// # Arguments
///
/// * `src` - The image to pad.
/// * `output_size` - The minimum size of the result, [`DEFAULT_OUTPUT_SIZE`] by default.
/// * `pad_value` - The value written to the new border pixels.
///
/// # Example
///
/// ```rust
/// use geoaug_image::{DenseImage, ImageSize};
/// use geoaug_imgproc::padding::pad_to_size;
/// use ndarray::Array2;
///
/// let image = DenseImage::from_gray(Array2::from_elem((2, 3), 1u8));
/// let padded = pad_to_size(&image, ImageSize { width: 4, height: 4 }, 0).unwrap();
///
/// assert_eq!(padded.shape(), vec![4, 4]);
/// ```
pub fn pad_to_size<I: SpatialImage>(
    src: &I,
    output_size: ImageSize,
    pad_value: I::Pixel,
) -> Result<I, ImageError> {
    pad_to_size_with_offsets(src, output_size, pad_value).map(|(image, _)| image)
}

/// Same as [`pad_to_size`], also returning the amounts that were added on each side.
pub fn pad_to_size_with_offsets<I: SpatialImage>(
    src: &I,
    output_size: ImageSize,
    pad_value: I::Pixel,
) -> Result<(I, Padding2D), ImageError> {
    let padding = Padding2D::to_reach(src.size(), output_size);
    let padded = src.pad(&padding, pad_value)?;
    Ok((padded, padding))
}

/// Write `src` into the centre of `dst` and fill the border with a constant value.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `constant_value` - The pixel value used for the border, one value per channel.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match with the expected size
/// i.e. after applying padding specified in argument `padding` on `src`.
///
/// # Example
///
/// ```rust
/// use geoaug_image::{ImageSize, Image};
/// use geoaug_imgproc::padding::{Padding2D, spatial_padding};
///
/// // Create a 2x2 RGB image filled with 1s
/// let src = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![1u8; 2 * 2 * 3],
/// ).unwrap();
///
/// // Create destination image
/// let mut dst = Image::<u8, 3>::new(
///     ImageSize { width: 4, height: 4 },
///     vec![0u8; 4 * 4 * 3],
/// ).unwrap();
///
/// // Apply 1-pixel constant padding with black (0) border
/// spatial_padding(
///     &src,
///     &mut dst,
///     &Padding2D { top: 1, bottom: 1, left: 1, right: 1 },
///     [0u8; 3],
/// ).unwrap();
///
/// assert_eq!(dst.size().width, 4);
/// assert_eq!(dst.size().height, 4);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: &Padding2D,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let new_stride = dst.width() * C;
    let old_stride = src.width() * C;

    let new_data = dst.as_slice_mut();
    new_data
        .chunks_exact_mut(C)
        .for_each(|chunk| chunk.copy_from_slice(&constant_value));

    if old_stride == 0 || src.height() == 0 {
        return Ok(());
    }

    // copy old image data as center of new image data
    let row_offset = padding.top * new_stride + padding.left * C;

    for (src_row, dst_row) in src
        .as_slice()
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_mut(new_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::{crop_image, CropOffset};
    use geoaug_image::DenseImage;
    use ndarray::{s, Array2, Array3};

    // helper functions
    fn make_src_2x2_rgb() -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4],
        )
    }

    const PAD_1: Padding2D = Padding2D {
        top: 1,
        bottom: 1,
        left: 1,
        right: 1,
    };

    #[test]
    fn test_spatial_padding_constant() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = Image::from_size_val(PAD_1.padded_size(src.size()), 0u8)?;

        spatial_padding(&src, &mut dst, &PAD_1, [9, 9, 9])?;

        let d = dst.as_slice();

        // corners
        assert_eq!(&d[0..3], &[9, 9, 9]);
        assert_eq!(&d[45..48], &[9, 9, 9]);

        // top edge
        assert_eq!(&d[3..6], &[9, 9, 9]);

        // actual image
        assert_eq!(&d[15..18], &[1, 1, 1]);
        assert_eq!(&d[30..33], &[4, 4, 4]);

        Ok(())
    }

    #[test]
    fn test_spatial_padding_dst_size_mismatch() -> Result<(), ImageError> {
        let src = make_src_2x2_rgb()?;
        let mut dst = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 4,
            },
            vec![0u8; 36],
        )?;

        let res = spatial_padding(&src, &mut dst, &PAD_1, [0, 0, 0]);
        assert!(res.is_err());

        Ok(())
    }

    #[test]
    fn test_padding_split() {
        let padding = Padding2D::to_reach(
            ImageSize {
                width: 100,
                height: 100,
            },
            ImageSize {
                width: 128,
                height: 128,
            },
        );
        assert_eq!(
            padding,
            Padding2D {
                top: 14,
                bottom: 14,
                left: 14,
                right: 14
            }
        );

        // odd remainder goes to bottom / right
        let padding = Padding2D::to_reach(
            ImageSize {
                width: 3,
                height: 4,
            },
            ImageSize {
                width: 6,
                height: 7,
            },
        );
        assert_eq!(
            padding,
            Padding2D {
                top: 1,
                bottom: 2,
                left: 1,
                right: 2
            }
        );
    }

    #[test]
    fn test_pad_dense_rgb_centres_content() -> Result<(), ImageError> {
        let data = Array3::from_shape_fn((3, 2, 3), |(y, x, c)| (1 + y * 10 + x * 3 + c) as u8);
        let image = DenseImage::from_array3(data.clone());

        let (padded, padding) = pad_to_size_with_offsets(
            &image,
            ImageSize {
                width: 5,
                height: 6,
            },
            0,
        )?;

        assert_eq!(padded.shape(), vec![6, 5, 3]);
        assert_eq!(
            padding,
            Padding2D {
                top: 1,
                bottom: 2,
                left: 1,
                right: 2
            }
        );
        assert_eq!(padded.view().slice(s![1..4, 1..3, ..]), data);
        assert!(padded.view().slice(s![0, .., ..]).iter().all(|&v| v == 0));
        assert!(padded.view().slice(s![.., 4, ..]).iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn test_pad_value_fills_border() -> Result<(), ImageError> {
        let image = DenseImage::from_gray(Array2::from_elem((1, 1), 0.25f32));
        let padded = pad_to_size(
            &image,
            ImageSize {
                width: 3,
                height: 3,
            },
            -1.0,
        )?;
        let view = padded.view();
        assert_eq!(view[[1, 1, 0]], 0.25);
        assert_eq!(view.iter().filter(|&&v| v == -1.0).count(), 8);
        Ok(())
    }

    #[test]
    fn test_pad_no_op_when_large_enough() -> Result<(), ImageError> {
        let image = DenseImage::from_gray(Array2::from_shape_fn((300, 20), |(y, x)| (y + x) as f64));

        let (padded, padding) = pad_to_size_with_offsets(&image, DEFAULT_OUTPUT_SIZE, 0.0)?;

        // only the width is padded
        assert_eq!(padded.shape(), vec![300, 256]);
        assert_eq!(padding.top + padding.bottom, 0);
        assert_eq!((padding.left, padding.right), (118, 118));

        // padding again with the same target changes nothing
        let (again, padding) = pad_to_size_with_offsets(&padded, DEFAULT_OUTPUT_SIZE, 0.0)?;
        assert!(padding.is_zero());
        assert_eq!(again, padded);

        Ok(())
    }

    #[test]
    fn test_pad_then_crop_round_trip() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            (1..=12).collect(),
        )?;

        let (padded, padding) = pad_to_size_with_offsets(
            &src,
            ImageSize {
                width: 8,
                height: 5,
            },
            0,
        )?;
        assert_eq!(
            padded.size(),
            ImageSize {
                width: 8,
                height: 5
            }
        );

        let recovered = crop_image(
            &padded,
            src.size(),
            CropOffset::new(padding.top, padding.left),
        )?;
        assert_eq!(recovered, src);

        Ok(())
    }
}
