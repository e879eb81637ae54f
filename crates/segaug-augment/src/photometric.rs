use rand::{seq::SliceRandom, Rng, RngCore};
use segaug_image::Image;
use segaug_imgproc::{enhance, filter};
use serde::{Deserialize, Serialize};

use crate::{error::AugmentError, sample::Sample, transform::Transform};

/// An image enhancement applied by [`RandomImageEnhance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceMethod {
    /// Blend with a grey image of the mean luma.
    Contrast,
    /// Blend with a black image.
    Brightness,
    /// Blend with a smoothed copy of the image.
    Sharpness,
}

impl EnhanceMethod {
    /// Apply the enhancement to `src` with the given factor.
    pub fn enhance(&self, src: &Image<u8, 3>, factor: f32) -> Result<Image<u8, 3>, AugmentError> {
        let mut dst = Image::from_size_val(src.size(), 0u8)?;
        match self {
            EnhanceMethod::Contrast => enhance::adjust_contrast(src, factor, &mut dst)?,
            EnhanceMethod::Brightness => enhance::adjust_brightness(src, factor, &mut dst)?,
            EnhanceMethod::Sharpness => enhance::adjust_sharpness(src, factor, &mut dst)?,
        }
        Ok(dst)
    }
}

/// Randomly strengthen contrast, brightness and sharpness of the image.
///
/// The enabled methods are visited in a fresh random order on every call. Each
/// one is applied with probability 1/2, with a factor drawn from `[1.0, 1.1)`.
/// Labels are untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomImageEnhance {
    methods: Vec<EnhanceMethod>,
}

impl RandomImageEnhance {
    /// Create an enhancement over `methods`.
    ///
    /// Repeated methods are kept once, in the order of their first appearance.
    pub fn new(methods: impl IntoIterator<Item = EnhanceMethod>) -> Self {
        let mut unique = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        Self { methods: unique }
    }

    /// The enabled methods.
    pub fn methods(&self) -> &[EnhanceMethod] {
        &self.methods
    }
}

impl Default for RandomImageEnhance {
    fn default() -> Self {
        Self::new([
            EnhanceMethod::Contrast,
            EnhanceMethod::Brightness,
            EnhanceMethod::Sharpness,
        ])
    }
}

impl Transform<Sample> for RandomImageEnhance {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        let mut order = self.methods.clone();
        order.shuffle(&mut *rng);

        for method in order {
            if !rng.random_bool(0.5) {
                continue;
            }
            let factor = 1.0 + rng.random::<f32>() / 10.0;
            log::trace!("RandomImageEnhance: {method:?} factor={factor:.4}");
            sample.image = method.enhance(&sample.image, factor)?;
        }

        Ok(sample)
    }
}

/// Randomly blur the image with a gaussian kernel.
///
/// With probability 1/2 the image is blurred with a standard deviation drawn
/// from `[0, 1)`. Labels are untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomGaussianBlur;

impl RandomGaussianBlur {
    /// Create a gaussian blur.
    pub fn new() -> Self {
        Self
    }
}

impl Transform<Sample> for RandomGaussianBlur {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        if !rng.random_bool(0.5) {
            return Ok(sample);
        }

        let sigma = rng.random::<f32>();
        let kernel_size = filter::kernels::gaussian_kernel_size(sigma);
        log::trace!("RandomGaussianBlur: sigma={sigma:.4} kernel_size={kernel_size}");

        if kernel_size <= 1 {
            return Ok(sample);
        }

        let mut blurred = Image::from_size_val(sample.image.size(), 0u8)?;
        filter::gaussian_blur(
            &sample.image,
            &mut blurred,
            (kernel_size, kernel_size),
            (sigma, sigma),
        )?;
        sample.image = blurred;

        Ok(sample)
    }
}
