use ndarray::{Array2, Array3};
use segaug_image::{Image, ImageSize};

use crate::error::AugmentError;

/// A labeled training example at the image stage.
///
/// `mask` and `contour` are optional single-channel rasters that share the
/// spatial size of `image`. Geometric transforms move all present rasters
/// together; photometric transforms only touch `image`.
///
/// # Example
///
/// ```
/// use segaug_augment::Sample;
/// use segaug_image::{Image, ImageSize};
///
/// let size = ImageSize { width: 4, height: 3 };
/// let sample = Sample::new(Image::from_size_val(size, 0u8).unwrap())
///     .with_mask(Image::from_size_val(size, 255u8).unwrap());
///
/// assert_eq!(sample.size(), size);
/// assert!(sample.contour.is_none());
/// assert!(sample.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// The color image with shape (H, W, 3).
    pub image: Image<u8, 3>,
    /// The segmentation mask with shape (H, W, 1).
    pub mask: Option<Image<u8, 1>>,
    /// The object contour with shape (H, W, 1).
    pub contour: Option<Image<u8, 1>>,
}

impl Sample {
    /// Create a sample holding only an image.
    pub fn new(image: Image<u8, 3>) -> Self {
        Self {
            image,
            mask: None,
            contour: None,
        }
    }

    /// Attach a segmentation mask.
    pub fn with_mask(mut self, mask: Image<u8, 1>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Attach an object contour.
    pub fn with_contour(mut self, contour: Image<u8, 1>) -> Self {
        self.contour = Some(contour);
        self
    }

    /// Spatial size of the image.
    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    /// Check that every present label has the spatial size of the image.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::SizeMismatch`] naming the first offending label.
    pub fn validate(&self) -> Result<(), AugmentError> {
        let size = self.size();
        for (name, label) in [("mask", &self.mask), ("contour", &self.contour)] {
            if let Some(label) = label {
                if label.size() != size {
                    return Err(AugmentError::SizeMismatch(name, label.size(), size));
                }
            }
        }
        Ok(())
    }
}

/// A sample converted to raw `f32` arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySample {
    /// The image values with shape (H, W, 3).
    pub image: Array3<f32>,
    /// The mask values with shape (H, W).
    pub mask: Option<Array2<f32>>,
    /// The contour, carried through unchanged.
    pub contour: Option<Image<u8, 1>>,
}

/// A sample in channel-major tensor layout, ready for a model.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorSample {
    /// The image values with shape (3, H, W).
    pub image: Array3<f32>,
    /// The mask values with shape (1, H, W).
    pub mask: Option<Array3<f32>>,
}
