use rand::{Rng, RngCore};
use segaug_image::{Image, ImageSize};
use segaug_imgproc::{crop, flip, interpolation::InterpolationMode, resize, warp};

use crate::{error::AugmentError, sample::Sample, transform::Transform};

/// Resize every raster of the sample to a fixed size.
///
/// The image and the mask use bilinear interpolation, the contour uses nearest
/// neighbour so it stays binary. The aspect ratio is not kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resize {
    size: ImageSize,
}

impl Resize {
    /// Create a resize to `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` has a zero side.
    pub fn new(size: ImageSize) -> Result<Self, AugmentError> {
        if size.area() == 0 {
            return Err(AugmentError::InvalidParameter(
                "size",
                format!("{size} must not be empty"),
            ));
        }
        Ok(Self { size })
    }

    /// The target size.
    pub fn size(&self) -> ImageSize {
        self.size
    }
}

impl Transform<Sample> for Resize {
    fn apply(&self, mut sample: Sample, _rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        sample.image = resize::resize(&sample.image, self.size, InterpolationMode::Bilinear)?;
        sample.mask = sample
            .mask
            .map(|mask| resize::resize(&mask, self.size, InterpolationMode::Bilinear))
            .transpose()?;
        sample.contour = sample
            .contour
            .map(|contour| resize::resize(&contour, self.size, InterpolationMode::Nearest))
            .transpose()?;
        Ok(sample)
    }
}

/// Resize `src` by `scale` and crop the centre back to its original size.
///
/// Pixels of the crop falling outside the scaled raster are zero.
fn scale_and_crop<const C: usize>(
    src: &Image<u8, C>,
    scale: f32,
    interpolation: InterpolationMode,
) -> Result<Image<u8, C>, AugmentError> {
    let scaled = resize::resize(src, resize::scaled_size(src.size(), scale), interpolation)?;
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    crop::center_crop(&scaled, &mut dst, [0u8; C])?;
    Ok(dst)
}

/// Randomly zoom in or out around the centre.
///
/// A scale is drawn from `[low, high]` on every call; with probability 1/2 every
/// raster is resized by it and centre-cropped back to its size. The image is
/// resampled bilinearly while labels use nearest neighbour so they stay binary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomScaleCrop {
    low: f32,
    high: f32,
}

impl RandomScaleCrop {
    /// Create a scale-crop drawing scales from `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `low` is not positive, exceeds `high`, or `high` is
    /// not finite.
    pub fn new(low: f32, high: f32) -> Result<Self, AugmentError> {
        let valid = low > 0.0 && low <= high && high.is_finite();
        if !valid {
            return Err(AugmentError::InvalidParameter(
                "range",
                format!("[{low}, {high}] must satisfy 0 < low <= high < inf"),
            ));
        }
        Ok(Self { low, high })
    }

    /// The scale range as `(low, high)`.
    pub fn range(&self) -> (f32, f32) {
        (self.low, self.high)
    }
}

impl Default for RandomScaleCrop {
    fn default() -> Self {
        Self {
            low: 0.75,
            high: 1.25,
        }
    }
}

impl Transform<Sample> for RandomScaleCrop {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        sample.validate()?;

        let scale = rng.random::<f32>() * (self.high - self.low) + self.low;
        let apply = rng.random_bool(0.5);
        log::trace!("RandomScaleCrop: scale={scale:.4} apply={apply}");

        if !apply {
            return Ok(sample);
        }

        sample.image = scale_and_crop(&sample.image, scale, InterpolationMode::Bilinear)?;
        sample.mask = sample
            .mask
            .map(|mask| scale_and_crop(&mask, scale, InterpolationMode::Nearest))
            .transpose()?;
        sample.contour = sample
            .contour
            .map(|contour| scale_and_crop(&contour, scale, InterpolationMode::Nearest))
            .transpose()?;

        Ok(sample)
    }
}

fn flip_raster<const C: usize>(
    src: Image<u8, C>,
    lr: bool,
    ud: bool,
) -> Result<Image<u8, C>, AugmentError> {
    let mut out = src;
    if lr {
        let mut dst = Image::from_size_val(out.size(), 0u8)?;
        flip::horizontal_flip(&out, &mut dst)?;
        out = dst;
    }
    if ud {
        let mut dst = Image::from_size_val(out.size(), 0u8)?;
        flip::vertical_flip(&out, &mut dst)?;
        out = dst;
    }
    Ok(out)
}

/// Randomly mirror the sample left-right and/or up-down.
///
/// Two fair coins are drawn on every call, one per axis, and only count for the
/// enabled axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomFlip {
    lr: bool,
    ud: bool,
}

impl RandomFlip {
    /// Create a flip over the enabled axes.
    pub fn new(lr: bool, ud: bool) -> Self {
        Self { lr, ud }
    }
}

impl Default for RandomFlip {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Transform<Sample> for RandomFlip {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        sample.validate()?;

        let lr = rng.random_bool(0.5) && self.lr;
        let ud = rng.random_bool(0.5) && self.ud;
        log::trace!("RandomFlip: lr={lr} ud={ud}");

        if !lr && !ud {
            return Ok(sample);
        }

        sample.image = flip_raster(sample.image, lr, ud)?;
        sample.mask = sample
            .mask
            .map(|mask| flip_raster(mask, lr, ud))
            .transpose()?;
        sample.contour = sample
            .contour
            .map(|contour| flip_raster(contour, lr, ud))
            .transpose()?;

        Ok(sample)
    }
}

/// Rotate `src` counter-clockwise on an expanded canvas and crop the centre
/// back to its original size.
fn rotate_and_crop<const C: usize>(
    src: &Image<u8, C>,
    angle: f32,
) -> Result<Image<u8, C>, AugmentError> {
    let rotated = warp::rotate_expand(src, angle, InterpolationMode::Nearest)?;
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    crop::center_crop(&rotated, &mut dst, [0u8; C])?;
    Ok(dst)
}

/// Randomly rotate the sample about its centre.
///
/// An integer angle is drawn from `[low, high)`, floored to a multiple of
/// `interval` and wrapped into `[0, 360)` when negative. With probability 1/2
/// every raster is rotated counter-clockwise by that angle with nearest
/// neighbour sampling; uncovered corners are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomRotate {
    low: i32,
    high: i32,
    interval: i32,
}

impl RandomRotate {
    /// Create a rotation drawing angles, in degrees, from `[low, high)`.
    ///
    /// `low == high` always yields `low`.
    ///
    /// # Errors
    ///
    /// Returns an error if `interval` is not positive or `low > high`.
    pub fn new(low: i32, high: i32, interval: i32) -> Result<Self, AugmentError> {
        if interval <= 0 {
            return Err(AugmentError::InvalidParameter(
                "interval",
                format!("{interval} must be positive"),
            ));
        }
        if low > high {
            return Err(AugmentError::InvalidParameter(
                "range",
                format!("[{low}, {high}) must satisfy low <= high"),
            ));
        }
        Ok(Self {
            low,
            high,
            interval,
        })
    }

    /// The angle range as `(low, high)`.
    pub fn range(&self) -> (i32, i32) {
        (self.low, self.high)
    }

    /// The snapping interval in degrees.
    pub fn interval(&self) -> i32 {
        self.interval
    }

    fn draw_angle(&self, rng: &mut dyn RngCore) -> i32 {
        let angle = if self.low == self.high {
            self.low
        } else {
            rng.random_range(self.low..self.high)
        };
        let angle = angle.div_euclid(self.interval) * self.interval;
        if angle < 0 {
            angle + 360
        } else {
            angle
        }
    }
}

impl Default for RandomRotate {
    fn default() -> Self {
        Self {
            low: 0,
            high: 360,
            interval: 1,
        }
    }
}

impl Transform<Sample> for RandomRotate {
    fn apply(&self, mut sample: Sample, rng: &mut dyn RngCore) -> Result<Sample, AugmentError> {
        sample.validate()?;

        let angle = self.draw_angle(rng);
        let apply = rng.random_bool(0.5);
        log::trace!("RandomRotate: angle={angle} apply={apply}");

        if !apply {
            return Ok(sample);
        }

        let angle = angle as f32;
        sample.image = rotate_and_crop(&sample.image, angle)?;
        sample.mask = sample
            .mask
            .map(|mask| rotate_and_crop(&mask, angle))
            .transpose()?;
        sample.contour = sample
            .contour
            .map(|contour| rotate_and_crop(&contour, angle))
            .transpose()?;

        Ok(sample)
    }
}
