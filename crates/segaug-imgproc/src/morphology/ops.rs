use super::kernels::Kernel;
use rayon::prelude::*;
use segaug_image::{Image, ImageError};

fn check_same_size<T, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        ));
    }
    Ok(())
}

/// Reduce the kernel neighborhood of every pixel with `select`.
///
/// Neighbors falling outside the image take no part in the reduction.
fn morphology_reduce<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    select: impl Fn(T, T) -> T + Send + Sync,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_same_size(src, dst)?;

    let (width, height) = (src.width() as isize, src.height() as isize);
    if width == 0 {
        return Ok(());
    }

    let offsets = kernel.offsets();
    let src_data = src.as_slice();
    let row_stride = src.width() * C;

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(h, dst_row)| {
            let h = h as isize;
            for w in 0..width {
                for c in 0..C {
                    let centre = src_data[h as usize * row_stride + w as usize * C + c];
                    let mut acc = centre;
                    for &(dy, dx) in offsets.iter() {
                        let (py, px) = (h + dy, w + dx);
                        if py < 0 || py >= height || px < 0 || px >= width {
                            continue;
                        }
                        let val = src_data[py as usize * row_stride + px as usize * C + c];
                        acc = select(acc, val);
                    }
                    dst_row[w as usize * C + c] = acc;
                }
            }
        });

    Ok(())
}

/// Dilate an image using a [`Kernel`].
///
/// Each pixel is replaced by the maximum value in the neighborhood defined by
/// the kernel. The anchor pixel always takes part, so an empty kernel leaves
/// the image unchanged.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The morphological structuring element ([`Kernel`]).
///
/// # Example
///
/// ```rust
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::morphology::{dilate, Kernel, KernelShape};
///
/// let size = ImageSize { width: 3, height: 1 };
/// let src = Image::<u8, 1>::new(size, vec![0, 255, 0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// dilate(&src, &mut dst, &Kernel::new(KernelShape::Box { size: 3 })).unwrap();
/// assert_eq!(dst.as_slice(), &[255, 255, 255]);
/// ```
pub fn dilate<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    morphology_reduce(src, dst, kernel, |a, b| a.max(b))
}

/// Erode an image using a [`Kernel`].
///
/// Each pixel is replaced by the minimum value in the neighborhood defined by
/// the kernel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The morphological structuring element ([`Kernel`]).
pub fn erode<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    morphology_reduce(src, dst, kernel, |a, b| a.min(b))
}
