/// Number of standard deviations covered by a gaussian kernel on each side.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f64> {
    vec![1.0 / kernel_size as f64; kernel_size]
}

/// The size of the gaussian kernel for `sigma`, truncated at [`GAUSSIAN_TRUNCATE`] deviations.
///
/// A non-positive sigma yields the identity kernel of size 1.
pub fn gaussian_kernel_size(sigma: f64) -> usize {
    if sigma <= 0.0 {
        return 1;
    }
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    2 * radius + 1
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum up to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return box_blur_kernel_1d(kernel_size.max(1));
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size as f64 - 1.0) / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f64 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}
