/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Kernel size covering three standard deviations on each side of the centre.
///
/// Always odd; returns 1 for a non-positive sigma.
pub fn gaussian_kernel_size(sigma: f32) -> usize {
    if sigma <= 0.0 {
        return 1;
    }
    2 * (3.0 * sigma).ceil() as usize + 1
}

/// The 3x3 smoothing kernel `[[1, 1, 1], [1, 5, 1], [1, 1, 1]] / 13`.
pub fn smooth_kernel_3x3() -> [[f32; 3]; 3] {
    let w = 1.0 / 13.0;
    [[w, w, w], [w, 5.0 * w, w], [w, w, w]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (i, &k) in kernel.iter().enumerate() {
            approx::assert_relative_eq!(k, expected[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gaussian_kernel_size() {
        assert_eq!(gaussian_kernel_size(0.0), 1);
        assert_eq!(gaussian_kernel_size(0.2), 3);
        assert_eq!(gaussian_kernel_size(0.9), 7);
    }

    #[test]
    fn test_smooth_kernel_sums_to_one() {
        let sum: f32 = smooth_kernel_3x3().iter().flatten().sum();
        approx::assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }
}
