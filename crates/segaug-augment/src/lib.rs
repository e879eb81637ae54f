#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Serde-driven pipeline configuration.
pub mod config;

/// Ordered pipelines of same-stage transforms.
pub mod compose;

/// Conversions from images to normalized arrays and tensors.
pub mod conversion;

/// Error types for the augmentation module.
pub mod error;

/// Transforms that move image and labels in lockstep.
pub mod geometric;

/// Transforms acting on the mask only.
pub mod label;

/// Transforms acting on the image pixels only.
pub mod photometric;

/// Sample records flowing through the pipeline.
pub mod sample;

/// The transform trait and typed chaining.
pub mod transform;

pub use crate::compose::Compose;
pub use crate::config::{AugmentConfig, NormalizeConfig, TrainingPipeline, TransformConfig};
pub use crate::conversion::{Normalize, ToNumpy, ToTensor};
pub use crate::error::AugmentError;
pub use crate::geometric::{RandomFlip, RandomRotate, RandomScaleCrop, Resize};
pub use crate::label::RandomDilationErosion;
pub use crate::photometric::{EnhanceMethod, RandomGaussianBlur, RandomImageEnhance};
pub use crate::sample::{ArraySample, Sample, TensorSample};
pub use crate::transform::{Chain, Transform};
