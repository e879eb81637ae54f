use rand::{Rng, RngCore};
use segaug_image::Image;
use segaug_imgproc::morphology::{self, Kernel, KernelShape};

use crate::{error::AugmentError, sample::Sample, transform::Transform};

/// Randomly grow or shrink the mask with an elliptical structuring element.
///
/// On every call a selector and a kernel size from `[low, high)` are drawn. A
/// third of the time the mask is dilated, a third of the time it is eroded,
/// and otherwise it is kept. The image and the contour are untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomDilationErosion {
    low: usize,
    high: usize,
}

impl RandomDilationErosion {
    /// Create a dilation/erosion drawing kernel sizes from `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `low` is zero or the range is empty.
    pub fn new(low: usize, high: usize) -> Result<Self, AugmentError> {
        if low == 0 || low >= high {
            return Err(AugmentError::InvalidParameter(
                "kernel_range",
                format!("[{low}, {high}) must satisfy 0 < low < high"),
            ));
        }
        Ok(Self { low, high })
    }

    /// The kernel size range as `(low, high)`.
    pub fn kernel_range(&self) -> (usize, usize) {
        (self.low, self.high)
    }
}

impl Transform<Sample> for RandomDilationErosion {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        let key = rng.random::<f64>();
        let size = rng.random_range(self.low..self.high);
        log::trace!("RandomDilationErosion: key={key:.4} kernel_size={size}");

        if key >= 2.0 / 3.0 {
            return Ok(sample);
        }

        let Some(mask) = sample.mask.take() else {
            return Ok(sample);
        };

        let kernel = Kernel::new(KernelShape::Ellipse {
            width: size,
            height: size,
        });

        let mut dst = Image::from_size_val(mask.size(), 0u8)?;
        if key < 1.0 / 3.0 {
            morphology::dilate(&mask, &mut dst, &kernel)?;
        } else {
            morphology::erode(&mask, &mut dst, &kernel)?;
        }
        sample.mask = Some(dst);

        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use segaug_image::ImageSize;

    fn disc_sample() -> Result<Sample, AugmentError> {
        let size = ImageSize {
            width: 15,
            height: 15,
        };
        let mut mask = Image::<u8, 1>::from_size_val(size, 0)?;
        for y in 0..15 {
            for x in 0..15 {
                let (dx, dy) = (x as i32 - 7, y as i32 - 7);
                if dx * dx + dy * dy <= 16 {
                    mask.as_slice_mut()[y * 15 + x] = 255;
                }
            }
        }
        let image = Image::<u8, 3>::new(size, (0..15 * 15 * 3).map(|i| i as u8).collect())?;
        Ok(Sample::new(image).with_mask(mask))
    }

    fn count_foreground(mask: &Image<u8, 1>) -> usize {
        mask.as_slice().iter().filter(|&&v| v == 255).count()
    }

    #[test]
    fn dilation_erosion_leaves_image() -> Result<(), AugmentError> {
        let unit = RandomDilationErosion::new(3, 6)?;
        let (mut grown, mut shrunk, mut kept) = (0, 0, 0);

        for seed in 0..32 {
            let sample = disc_sample()?;
            let out = unit.apply(sample.clone(), &mut StdRng::seed_from_u64(seed))?;
            assert_eq!(out.image, sample.image);

            let (Some(before), Some(after)) = (sample.mask.as_ref(), out.mask.as_ref()) else {
                panic!("mask dropped");
            };
            let (before, after) = (count_foreground(before), count_foreground(after));
            match after.cmp(&before) {
                std::cmp::Ordering::Greater => grown += 1,
                std::cmp::Ordering::Less => shrunk += 1,
                std::cmp::Ordering::Equal => kept += 1,
            }
        }

        assert!(grown > 0);
        assert!(shrunk > 0);
        assert!(kept > 0);

        Ok(())
    }

    #[test]
    fn unit_kernel_keeps_mask() -> Result<(), AugmentError> {
        let unit = RandomDilationErosion::new(1, 2)?;
        for seed in 0..8 {
            let sample = disc_sample()?;
            let out = unit.apply(sample.clone(), &mut StdRng::seed_from_u64(seed))?;
            assert_eq!(out, sample);
        }
        Ok(())
    }

    #[test]
    fn missing_mask_is_skipped() -> Result<(), AugmentError> {
        let unit = RandomDilationErosion::new(3, 4)?;
        let sample = Sample::new(Image::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            7,
        )?);
        let out = unit.apply(sample.clone(), &mut StdRng::seed_from_u64(1))?;
        assert_eq!(out, sample);
        Ok(())
    }

    #[test]
    fn invalid_kernel_range() {
        assert!(RandomDilationErosion::new(0, 3).is_err());
        assert!(RandomDilationErosion::new(3, 3).is_err());
        assert!(RandomDilationErosion::new(2, 3).is_ok());
    }
}
