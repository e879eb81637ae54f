use rand::RngCore;

use crate::{error::AugmentError, transform::Transform};

/// An ordered list of transforms over the same sample type.
///
/// The transforms run in insertion order and share the generator passed to
/// [`Transform::apply`]. An empty `Compose` returns its input unchanged.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use segaug_augment::{Compose, RandomFlip, RandomRotate, Sample, Transform};
/// use segaug_image::{Image, ImageSize};
///
/// let mut pipeline = Compose::new();
/// pipeline.push(RandomFlip::default());
/// pipeline.push(RandomRotate::default());
///
/// let size = ImageSize { width: 8, height: 6 };
/// let sample = Sample::new(Image::from_size_val(size, 0u8).unwrap());
///
/// let out = pipeline.apply(sample, &mut StdRng::seed_from_u64(0)).unwrap();
/// assert_eq!(out.size(), size);
/// ```
pub struct Compose<S> {
    transforms: Vec<Box<dyn Transform<S>>>,
}

impl<S> Compose<S> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Append a transform to the end of the pipeline.
    pub fn push(&mut self, transform: impl Transform<S> + 'static) {
        self.transforms.push(Box::new(transform));
    }

    /// Append an already boxed transform to the end of the pipeline.
    pub fn push_boxed(&mut self, transform: Box<dyn Transform<S>>) {
        self.transforms.push(transform);
    }

    /// Number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the pipeline holds no transform.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<S> Default for Compose<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Compose<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compose")
            .field("len", &self.transforms.len())
            .finish()
    }
}

impl<S> Transform<S> for Compose<S> {
    fn apply(&self, input: S, rng: &mut dyn RngCore) -> Result<S, AugmentError> {
        self.transforms
            .iter()
            .try_fold(input, |sample, transform| transform.apply(sample, &mut *rng))
    }
}
