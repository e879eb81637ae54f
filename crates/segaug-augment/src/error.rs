use segaug_image::{ImageError, ImageSize};

/// An error type for the augmentation module.
#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    /// Error raised by an image primitive.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error when a transform is configured with an invalid parameter.
    #[error("Invalid parameter `{0}`: {1}")]
    InvalidParameter(&'static str, String),

    /// Error when a label raster does not share the spatial size of the image.
    #[error("Size of the {0} ({1}) does not match the image size ({2})")]
    SizeMismatch(&'static str, ImageSize, ImageSize),

    /// Error when a pipeline configuration cannot be parsed.
    #[error("Invalid pipeline configuration")]
    Config(#[from] serde_json::Error),
}
