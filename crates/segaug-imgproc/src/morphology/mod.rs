/// Structuring elements for morphological operations.
pub mod kernels;
pub use kernels::{Kernel, KernelShape};

mod ops;
pub use ops::{dilate, erode};
