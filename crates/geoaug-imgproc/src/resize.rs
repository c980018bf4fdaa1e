use geoaug_image::{DenseImage, ImageDtype, ImageError, ImageSize};
use ndarray::Array3;
use rayon::prelude::*;

use crate::filter::gaussian_blur;

/// Compute the size of an image of `size` rescaled by `scale_factor`.
///
/// Each side is rounded half to even and is at least one pixel.
///
/// # Example
///
/// ```
/// use geoaug_image::ImageSize;
/// use geoaug_imgproc::resize::rescaled_size;
///
/// let size = rescaled_size(ImageSize { width: 640, height: 5 }, 0.5);
/// assert_eq!(size, ImageSize { width: 320, height: 2 });
/// ```
pub fn rescaled_size(size: ImageSize, scale_factor: f64) -> ImageSize {
    let scale = |len: usize| ((len as f64 * scale_factor).round_ties_even() as usize).max(1);
    ImageSize {
        width: scale(size.width),
        height: scale(size.height),
    }
}

/// Rescale an image by a factor with anti-aliasing.
///
/// The image is resized to [`rescaled_size`] with [`resize`]. A factor above one
/// enlarges the image, below one shrinks it. Channels are resampled independently.
///
/// # Arguments
///
/// * `src` - The input image, with or without a channel axis.
/// * `scale_factor` - The scale factor, finite and strictly positive.
///
/// # Errors
///
/// Returns [`ImageError::InvalidScaleFactor`] for a non positive or non finite factor.
///
/// # Example
///
/// ```
/// use geoaug_image::DenseImage;
/// use geoaug_imgproc::resize::rescale;
/// use ndarray::Array3;
///
/// let image = DenseImage::from_array3(Array3::<f32>::zeros((4, 6, 3)));
/// let scaled = rescale(&image, 0.5).unwrap();
///
/// assert_eq!(scaled.shape(), vec![2, 3, 3]);
/// ```
pub fn rescale<T: ImageDtype>(
    src: &DenseImage<T>,
    scale_factor: f64,
) -> Result<DenseImage<T>, ImageError> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(ImageError::InvalidScaleFactor(scale_factor));
    }
    resize(src, rescaled_size(src.size(), scale_factor))
}

/// Resize an image to a new size with anti-aliasing.
///
/// When an axis is shrunk, the image is first blurred along it with a gaussian of
/// `sigma = (in / out - 1) / 2`. The output is then sampled bilinearly at the
/// pixel centres `(dst + 0.5) * in / out - 0.5`, mirroring coordinates that fall
/// outside of the image. Integer pixel types are rounded back and clamped.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `new_size` - The size of the output image.
///
/// # Errors
///
/// The source and the output must not be empty.
pub fn resize<T: ImageDtype>(
    src: &DenseImage<T>,
    new_size: ImageSize,
) -> Result<DenseImage<T>, ImageError> {
    let size = src.size();
    if size.width == 0 || size.height == 0 || new_size.width == 0 || new_size.height == 0 {
        return Err(ImageError::InvalidImageSize(
            new_size.width,
            new_size.height,
            size.width,
            size.height,
        ));
    }

    let factor_x = size.width as f64 / new_size.width as f64;
    let factor_y = size.height as f64 / new_size.height as f64;

    let mut data: Array3<f64> = src.view().mapv(|v| v.into());

    let sigma = (anti_aliasing_sigma(factor_x), anti_aliasing_sigma(factor_y));
    if sigma.0 > 0.0 || sigma.1 > 0.0 {
        data = gaussian_blur(&data, sigma)?;
    }

    let channels = src.num_channels();
    let stride = new_size.width * channels;
    let mut dst = vec![T::default(); new_size.height * stride];

    if stride > 0 {
        dst.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let v = source_coordinate(y, factor_y, size.height);
                for x in 0..new_size.width {
                    let u = source_coordinate(x, factor_x, size.width);
                    for ch in 0..channels {
                        row[x * channels + ch] = T::from_f64(bilinear(&data, u, v, ch));
                    }
                }
            });
    }

    let dst = Array3::from_shape_vec((new_size.height, new_size.width, channels), dst)?;
    DenseImage::with_layout(dst, src.has_channel_axis())
}

fn anti_aliasing_sigma(factor: f64) -> f64 {
    ((factor - 1.0) / 2.0).max(0.0)
}

// maps an output pixel centre into the source grid, mirrored into [0, len - 1]
fn source_coordinate(dst: usize, factor: f64, len: usize) -> f64 {
    let last = (len - 1) as f64;
    let mut c = (dst as f64 + 0.5) * factor - 0.5;
    if last == 0.0 {
        return 0.0;
    }
    while c < 0.0 || c > last {
        if c < 0.0 {
            c = -c;
        } else {
            c = 2.0 * last - c;
        }
    }
    c
}

fn bilinear(data: &Array3<f64>, u: f64, v: f64, ch: usize) -> f64 {
    let (rows, cols, _) = data.dim();

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u - iu0 as f64;
    let frac_v = v - iv0 as f64;

    let p00 = data[[iv0, iu0, ch]];
    let p01 = data[[iv0, iu1, ch]];
    let p10 = data[[iv1, iu0, ch]];
    let p11 = data[[iv1, iu1, ch]];

    // skip the neighbours with a zero weight so that grid points are reproduced exactly
    let top = if frac_u == 0.0 {
        p00
    } else {
        p00 * (1.0 - frac_u) + p01 * frac_u
    };
    if frac_v == 0.0 {
        return top;
    }
    let bottom = if frac_u == 0.0 {
        p10
    } else {
        p10 * (1.0 - frac_u) + p11 * frac_u
    };
    top * (1.0 - frac_v) + bottom * frac_v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn rescale_identity_is_exact() -> Result<(), ImageError> {
        let data = Array3::from_shape_fn((5, 7, 3), |(y, x, c)| ((y * 31 + x * 7 + c) % 256) as u8);
        let image = DenseImage::from_array3(data);

        let scaled = rescale(&image, 1.0)?;
        assert_eq!(scaled, image);

        Ok(())
    }

    #[test]
    fn rescale_shapes() -> Result<(), ImageError> {
        let gray = DenseImage::from_gray(Array2::<f32>::zeros((10, 6)));

        assert_eq!(rescale(&gray, 0.5)?.shape(), vec![5, 3]);
        assert_eq!(rescale(&gray, 2.0)?.shape(), vec![20, 12]);
        // 2.5 rounds to even
        assert_eq!(rescale(&gray, 0.25)?.shape(), vec![2, 2]);
        // never collapses to zero
        assert_eq!(rescale(&gray, 0.01)?.shape(), vec![1, 1]);

        Ok(())
    }

    #[test]
    fn rescale_rejects_invalid_factor() {
        let gray = DenseImage::from_gray(Array2::<f32>::zeros((4, 4)));
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                rescale(&gray, factor),
                Err(ImageError::InvalidScaleFactor(_))
            ));
        }
    }

    #[test]
    fn rescale_constant_image() -> Result<(), ImageError> {
        let image = DenseImage::from_array3(Array3::from_elem((9, 12, 3), 0.75f64));
        for factor in [0.3, 0.5, 1.7] {
            let scaled = rescale(&image, factor)?;
            for v in scaled.view().iter() {
                assert_relative_eq!(*v, 0.75, epsilon = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn downsample_averages_stripes() -> Result<(), ImageError> {
        // alternating columns average out once the aliasing frequency is removed
        let image =
            DenseImage::from_gray(Array2::from_shape_fn((8, 16), |(_, x)| (x % 2) as f64));
        let scaled = rescale(&image, 0.5)?;
        assert_eq!(scaled.shape(), vec![4, 8]);
        for v in scaled.view().iter() {
            assert_relative_eq!(*v, 0.5, epsilon = 0.1);
        }
        Ok(())
    }

    #[test]
    fn upsample_interpolates() -> Result<(), ImageError> {
        let image = DenseImage::from_gray(Array2::from_shape_vec((1, 2), vec![0.0, 1.0])?);
        let scaled = rescale(&image, 2.0)?;
        let view = scaled.view();
        // pixel centres map to -0.25, 0.25, 0.75 and 1.25 in the source grid
        assert_relative_eq!(view[[0, 0, 0]], 0.25, epsilon = 1e-12);
        assert_relative_eq!(view[[0, 1, 0]], 0.25, epsilon = 1e-12);
        assert_relative_eq!(view[[0, 2, 0]], 0.75, epsilon = 1e-12);
        assert_relative_eq!(view[[0, 3, 0]], 0.75, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn resize_rejects_empty() {
        let empty = DenseImage::from_gray(Array2::<f32>::zeros((0, 4)));
        assert!(resize(
            &empty,
            ImageSize {
                width: 2,
                height: 2
            }
        )
        .is_err());
    }
}
