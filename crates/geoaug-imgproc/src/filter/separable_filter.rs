use geoaug_image::ImageError;
use ndarray::Array3;
use rayon::prelude::*;

use super::kernels::{gaussian_kernel_1d, gaussian_kernel_size};

/// Maps a possibly out-of-range index into `[0, len)` by mirroring around the
/// edge pixels, without repeating them.
///
/// Example: ...d c b | a b c d | c b a...
#[inline]
fn reflect101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let mut i = i;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i;
        } else if i >= len {
            i = 2 * len - i - 2;
        }
    }
    i as usize
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter {
    kernel_x: Vec<f64>,
    kernel_y: Vec<f64>,
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl SeparableFilter {
    /// Create a new separable filter with the given kernels.
    fn new(kernel_x: &[f64], kernel_y: &[f64]) -> Self {
        let half_x = kernel_x.len() / 2;
        let half_y = kernel_y.len() / 2;

        let offsets_x = (0..kernel_x.len())
            .map(|i| i as isize - half_x as isize)
            .collect();

        let offsets_y = (0..kernel_y.len())
            .map(|i| i as isize - half_y as isize)
            .collect();

        Self {
            kernel_x: kernel_x.to_vec(),
            kernel_y: kernel_y.to_vec(),
            offsets_x,
            offsets_y,
        }
    }

    /// Apply the filter to a row-major (H, W, C) buffer.
    ///
    /// Performs horizontal filtering followed by vertical filtering using a temporary buffer.
    fn apply(&self, src: &[f64], dst: &mut [f64], rows: usize, cols: usize, channels: usize) {
        let stride = cols * channels;
        if stride == 0 || rows == 0 {
            return;
        }

        let mut temp = vec![0.0f64; src.len()];

        // horizontal
        temp.par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .for_each(|(row_temp, row_src)| {
                for c in 0..cols {
                    for ch in 0..channels {
                        let mut acc = 0.0;
                        for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                            let x = reflect101(c as isize + off, cols);
                            acc += row_src[x * channels + ch] * k;
                        }
                        row_temp[c * channels + ch] = acc;
                    }
                }
            });

        // vertical
        dst.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(r, row_dst)| {
                for (i, out) in row_dst.iter_mut().enumerate() {
                    let mut acc = 0.0;
                    for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                        let y = reflect101(r as isize + off, rows);
                        acc += temp[y * stride + i] * k;
                    }
                    *out = acc;
                }
            });
    }
}

/// Apply a separable filter to every channel of a (H, W, C) array.
///
/// Borders are handled by mirroring the image around its edge pixels.
///
/// # Arguments
///
/// * `src` - The source array with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter(
    src: &Array3<f64>,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<Array3<f64>, ImageError> {
    let (rows, cols, channels) = src.dim();

    // logical iteration order is (H, W, C) regardless of the memory layout
    let src_data: Vec<f64> = src.iter().copied().collect();
    let mut dst_data = vec![0.0f64; src_data.len()];

    SeparableFilter::new(kernel_x, kernel_y).apply(&src_data, &mut dst_data, rows, cols, channels);

    Ok(Array3::from_shape_vec((rows, cols, channels), dst_data)?)
}

/// Blur every channel of a (H, W, C) array with a gaussian.
///
/// # Arguments
///
/// * `src` - The source array with shape (H, W, C).
/// * `sigma` - The standard deviation along (x, y). Zero disables the blur on that axis.
pub fn gaussian_blur(src: &Array3<f64>, sigma: (f64, f64)) -> Result<Array3<f64>, ImageError> {
    let kernel_x = gaussian_kernel_1d(gaussian_kernel_size(sigma.0), sigma.0);
    let kernel_y = gaussian_kernel_1d(gaussian_kernel_size(sigma.1), sigma.1);
    separable_filter(src, &kernel_x, &kernel_y)
}
