use rand::RngCore;
use segaug_image::ImageSize;
use serde::{Deserialize, Serialize};

use crate::{
    compose::Compose,
    conversion::{Normalize, ToNumpy, ToTensor},
    error::AugmentError,
    geometric::{RandomFlip, RandomRotate, RandomScaleCrop, Resize},
    label::RandomDilationErosion,
    photometric::{EnhanceMethod, RandomGaussianBlur, RandomImageEnhance},
    sample::{ArraySample, Sample, TensorSample},
    transform::{Chain, Transform},
};

fn default_true() -> bool {
    true
}

fn default_scale_range() -> [f32; 2] {
    [0.75, 1.25]
}

fn default_rotate_range() -> [i32; 2] {
    [0, 360]
}

fn default_interval() -> i32 {
    1
}

fn default_enhance_methods() -> Vec<EnhanceMethod> {
    RandomImageEnhance::default().methods().to_vec()
}

/// Description of one image-stage transform.
///
/// Serialized with a `type` tag, e.g. `{"type": "random_rotate", "range": [0, 360]}`.
/// Omitted fields take the defaults of the matching transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformConfig {
    /// See [`Resize`].
    Resize {
        /// Target width in pixels.
        width: usize,
        /// Target height in pixels.
        height: usize,
    },
    /// See [`RandomScaleCrop`].
    RandomScaleCrop {
        /// Scale range `[low, high]`.
        #[serde(default = "default_scale_range")]
        range: [f32; 2],
    },
    /// See [`RandomFlip`].
    RandomFlip {
        /// Enable left-right flips.
        #[serde(default = "default_true")]
        lr: bool,
        /// Enable up-down flips.
        #[serde(default = "default_true")]
        ud: bool,
    },
    /// See [`RandomRotate`].
    RandomRotate {
        /// Angle range `[low, high)` in degrees.
        #[serde(default = "default_rotate_range")]
        range: [i32; 2],
        /// Snapping interval in degrees.
        #[serde(default = "default_interval")]
        interval: i32,
    },
    /// See [`RandomImageEnhance`].
    RandomImageEnhance {
        /// Enabled enhancements.
        #[serde(default = "default_enhance_methods")]
        methods: Vec<EnhanceMethod>,
    },
    /// See [`RandomDilationErosion`].
    RandomDilationErosion {
        /// Kernel size range `[low, high)`.
        kernel_range: [usize; 2],
    },
    /// See [`RandomGaussianBlur`].
    RandomGaussianBlur,
}

impl TransformConfig {
    /// Build the described transform.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are rejected by the transform.
    pub fn build(&self) -> Result<Box<dyn Transform<Sample>>, AugmentError> {
        let transform: Box<dyn Transform<Sample>> = match self {
            TransformConfig::Resize { width, height } => Box::new(Resize::new(ImageSize {
                width: *width,
                height: *height,
            })?),
            TransformConfig::RandomScaleCrop { range } => {
                Box::new(RandomScaleCrop::new(range[0], range[1])?)
            }
            TransformConfig::RandomFlip { lr, ud } => Box::new(RandomFlip::new(*lr, *ud)),
            TransformConfig::RandomRotate { range, interval } => {
                Box::new(RandomRotate::new(range[0], range[1], *interval)?)
            }
            TransformConfig::RandomImageEnhance { methods } => {
                Box::new(RandomImageEnhance::new(methods.iter().copied()))
            }
            TransformConfig::RandomDilationErosion { kernel_range } => Box::new(
                RandomDilationErosion::new(kernel_range[0], kernel_range[1])?,
            ),
            TransformConfig::RandomGaussianBlur => Box::new(RandomGaussianBlur::new()),
        };
        Ok(transform)
    }
}

/// Per-channel statistics used by [`Normalize`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Per-channel mean, in unit range.
    pub mean: [f32; 3],
    /// Per-channel standard deviation, in unit range.
    pub std: [f32; 3],
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        let imagenet = Normalize::imagenet();
        Self {
            mean: imagenet.mean(),
            std: imagenet.std(),
        }
    }
}

/// Description of a full training pipeline.
///
/// The image-stage transforms run in order, followed by [`ToNumpy`],
/// [`Normalize`] and [`ToTensor`].
///
/// # Example
///
/// ```
/// use segaug_augment::AugmentConfig;
///
/// let config = AugmentConfig::from_json_str(
///     r#"{
///         "transforms": [
///             {"type": "resize", "width": 64, "height": 64},
///             {"type": "random_flip", "ud": false},
///             {"type": "random_gaussian_blur"}
///         ],
///         "normalize": {"mean": [0.5, 0.5, 0.5], "std": [0.5, 0.5, 0.5]}
///     }"#,
/// )
/// .unwrap();
///
/// let pipeline = config.build().unwrap();
/// assert_eq!(pipeline.augment().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Image-stage transforms, in application order.
    pub transforms: Vec<TransformConfig>,
    /// Normalization statistics; ImageNet when omitted.
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            transforms: vec![
                TransformConfig::RandomScaleCrop {
                    range: default_scale_range(),
                },
                TransformConfig::RandomFlip { lr: true, ud: true },
                TransformConfig::RandomRotate {
                    range: default_rotate_range(),
                    interval: default_interval(),
                },
                TransformConfig::RandomImageEnhance {
                    methods: default_enhance_methods(),
                },
                TransformConfig::RandomGaussianBlur,
            ],
            normalize: NormalizeConfig::default(),
        }
    }
}

impl AugmentConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, AugmentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, AugmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration and build the pipeline it describes.
    pub fn build(&self) -> Result<TrainingPipeline, AugmentError> {
        let mut augment = Compose::new();
        for transform in self.transforms.iter() {
            augment.push_boxed(transform.build()?);
        }
        let normalize = Normalize::new(self.normalize.mean, self.normalize.std)?;

        log::debug!(
            "built training pipeline with {} augmentations, {:?}",
            augment.len(),
            normalize
        );

        Ok(TrainingPipeline::new(augment, normalize))
    }
}

type Stages = Chain<
    Chain<Chain<Compose<Sample>, ToNumpy, Sample>, Normalize, ArraySample>,
    ToTensor,
    ArraySample,
>;

/// Image-stage augmentation followed by conversion to normalized tensors.
#[derive(Debug)]
pub struct TrainingPipeline {
    stages: Stages,
}

impl TrainingPipeline {
    /// Assemble a pipeline from its augmentation stage and normalization.
    pub fn new(augment: Compose<Sample>, normalize: Normalize) -> Self {
        Self {
            stages: augment.then(ToNumpy).then(normalize).then(ToTensor),
        }
    }

    /// The image-stage transforms.
    pub fn augment(&self) -> &Compose<Sample> {
        self.stages.first().first().first()
    }

    /// The normalization stage.
    pub fn normalize(&self) -> &Normalize {
        self.stages.first().second()
    }
}

impl Transform<Sample, TensorSample> for TrainingPipeline {
    fn apply(&self, sample: Sample, rng: &mut dyn RngCore) -> Result<TensorSample, AugmentError> {
        self.stages.apply(sample, rng)
    }
}
