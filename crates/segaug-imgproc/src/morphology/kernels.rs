/// Shapes of morphological `Kernels`.
///
/// All kernels are anchored at `(width / 2, height / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A rectangular box structuring element.
    Box {
        /// The side length of the square kernel (size x size).
        size: usize,
    },

    /// A cross (plus) shaped structuring element.
    ///
    /// Only pixels along the horizontal and vertical center lines are included.
    Cross {
        /// The side length of the square cross kernel (size x size).
        size: usize,
    },

    /// An ellipse (or circle) inscribed in a `width x height` box.
    ///
    /// Rows are rasterised the same way as OpenCV's `MORPH_ELLIPSE`, so a
    /// `size x size` ellipse matches `getStructuringElement` exactly.
    Ellipse {
        /// The width of the ellipse.
        width: usize,
        /// The height of the ellipse.
        height: usize,
    },
}

/// A morphological structuring element.
///
/// Stores a binary mask where 1 marks the pixels included in the neighborhood.
///
/// # Example
///
/// ```rust
/// use segaug_imgproc::morphology::{Kernel, KernelShape};
///
/// let kernel = Kernel::new(KernelShape::Box { size: 3 });
/// assert_eq!(kernel.width(), 3);
/// assert_eq!(kernel.height(), 3);
/// assert_eq!(kernel.pad(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a morphological kernel from a shape.
    pub fn new(shape: KernelShape) -> Self {
        match shape {
            KernelShape::Box { size } => box_kernel(size),
            KernelShape::Cross { size } => cross_kernel(size),
            KernelShape::Ellipse { width, height } => ellipse_kernel(width, height),
        }
    }

    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the anchor offset of the kernel as `(rows, cols)`.
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Offsets `(dy, dx)` of the active kernel pixels relative to the anchor.
    pub(crate) fn offsets(&self) -> Vec<(isize, isize)> {
        let (pad_h, pad_w) = self.pad();
        let mut offsets = Vec::new();
        for ky in 0..self.height {
            for kx in 0..self.width {
                if self.data[ky * self.width + kx] == 1 {
                    offsets.push((ky as isize - pad_h as isize, kx as isize - pad_w as isize));
                }
            }
        }
        offsets
    }
}

fn box_kernel(size: usize) -> Kernel {
    Kernel {
        data: vec![1u8; size * size],
        width: size,
        height: size,
    }
}

fn cross_kernel(size: usize) -> Kernel {
    let mut data = vec![0u8; size * size];
    let mid = size / 2;

    for j in 0..size {
        data[mid * size + j] = 1;
    }

    for i in 0..size {
        data[i * size + mid] = 1;
    }

    Kernel {
        data,
        width: size,
        height: size,
    }
}

fn ellipse_kernel(width: usize, height: usize) -> Kernel {
    let mut data = vec![0u8; width * height];

    let r = (height / 2) as isize;
    let c = (width / 2) as isize;
    let inv_r2 = if r > 0 { 1.0 / (r * r) as f64 } else { 0.0 };

    for i in 0..height {
        let dy = i as isize - r;
        if dy.abs() > r {
            continue;
        }

        let dx = (c as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as isize;
        let j1 = (c - dx).max(0) as usize;
        let j2 = ((c + dx + 1) as usize).min(width);

        for j in j1..j2 {
            data[i * width + j] = 1;
        }
    }

    Kernel {
        data,
        width,
        height,
    }
}
