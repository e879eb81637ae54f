use ndarray::Axis;
use rand::RngCore;

use crate::{
    error::AugmentError,
    sample::{ArraySample, Sample, TensorSample},
    transform::Transform,
};

/// Convert the image and mask rasters into `f32` arrays, keeping their values.
///
/// The image becomes an (H, W, 3) array and the mask an (H, W) array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToNumpy;

impl Transform<Sample, ArraySample> for ToNumpy {
    fn apply(&self, sample: Sample, _rng: &mut dyn RngCore) -> Result<ArraySample, AugmentError> {
        let image = sample.image.to_array3_f32()?;
        let mask = sample
            .mask
            .as_ref()
            .map(|mask| mask.to_array2_f32())
            .transpose()?;

        Ok(ArraySample {
            image,
            mask,
            contour: sample.contour,
        })
    }
}

/// Scale arrays to unit range and standardize the image per channel.
///
/// The image is divided by 255, then `mean` is subtracted and the result is
/// divided by `std`, channel by channel. The mask is divided by 255.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use rand::{rngs::StdRng, SeedableRng};
/// use segaug_augment::{ArraySample, Normalize, Transform};
///
/// let sample = ArraySample {
///     image: Array3::from_elem((2, 2, 3), 255.0),
///     mask: None,
///     contour: None,
/// };
///
/// let normalize = Normalize::new([0.5; 3], [0.5; 3]).unwrap();
/// let out = normalize.apply(sample, &mut StdRng::seed_from_u64(0)).unwrap();
///
/// assert!(out.image.iter().all(|&v| v == 1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    mean: [f32; 3],
    std: [f32; 3],
}

impl Normalize {
    /// Create a normalization with per-channel `mean` and `std`.
    ///
    /// # Errors
    ///
    /// Returns an error if any `std` entry is zero or not finite.
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Result<Self, AugmentError> {
        if std.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(AugmentError::InvalidParameter(
                "std",
                format!("{std:?} must be finite and non-zero"),
            ));
        }
        Ok(Self { mean, std })
    }

    /// The ImageNet channel statistics.
    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    /// The per-channel mean.
    pub fn mean(&self) -> [f32; 3] {
        self.mean
    }

    /// The per-channel standard deviation.
    pub fn std(&self) -> [f32; 3] {
        self.std
    }
}

impl Transform<ArraySample> for Normalize {
    fn apply(
        &self,
        mut sample: ArraySample,
        _rng: &mut dyn RngCore,
    ) -> Result<ArraySample, AugmentError> {
        let channels = sample.image.len_of(Axis(2));
        if channels != 3 {
            return Err(AugmentError::InvalidParameter(
                "image",
                format!("expected 3 channels, got {channels}"),
            ));
        }

        for mut pixel in sample.image.lanes_mut(Axis(2)) {
            for ((value, &mean), &std) in pixel.iter_mut().zip(&self.mean).zip(&self.std) {
                *value /= 255.0;
                *value -= mean;
                *value /= std;
            }
        }

        if let Some(mask) = sample.mask.as_mut() {
            mask.mapv_inplace(|v| v / 255.0);
        }

        Ok(sample)
    }
}

/// Move the image to channel-major (C, H, W) layout and give the mask a
/// leading channel axis. The contour is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToTensor;

impl Transform<ArraySample, TensorSample> for ToTensor {
    fn apply(
        &self,
        sample: ArraySample,
        _rng: &mut dyn RngCore,
    ) -> Result<TensorSample, AugmentError> {
        let image = sample
            .image
            .permuted_axes([2, 0, 1])
            .as_standard_layout()
            .into_owned();
        let mask = sample.mask.map(|mask| mask.insert_axis(Axis(0)));

        Ok(TensorSample { image, mask })
    }
}
