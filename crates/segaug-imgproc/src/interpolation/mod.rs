//! Pixel interpolation methods for image transformations.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation). Keeps
//!   label rasters binary.
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! Coordinates are expressed in pixel index units: the centre of pixel `(x, y)`
//! sits at `(x, y)`.

mod bilinear;
mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
