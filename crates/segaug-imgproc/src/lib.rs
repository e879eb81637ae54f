#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// utilities for interpolation.
pub mod interpolation;

/// morphological operations module.
pub mod morphology;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// image geometric transformations module.
pub mod warp;
