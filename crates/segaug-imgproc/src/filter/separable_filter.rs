use rayon::prelude::*;
use segaug_image::{Image, ImageDtype, ImageError};

/// Clamp a signed index into `[0, len)`, replicating the border pixel.
fn replicate_index(idx: isize, len: usize) -> usize {
    idx.clamp(0, len as isize - 1) as usize
}

/// Apply a separable filter to an image.
///
/// Performs horizontal filtering followed by vertical filtering through an `f32`
/// buffer. Samples outside the image replicate the nearest border pixel. Both
/// kernels are centred, so they should have odd length.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
pub fn separable_filter<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    let src_data = src.as_slice();
    let row_stride = cols * C;

    // horizontal pass
    let mut temp = vec![0.0f32; src_data.len()];
    temp.par_chunks_exact_mut(row_stride)
        .zip(src_data.par_chunks_exact(row_stride))
        .for_each(|(temp_row, src_row)| {
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (i, &k) in kernel_x.iter().enumerate() {
                    let x = replicate_index(c as isize + i as isize - half_x, cols);
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        let val: f32 = src_row[x * C + ch].into();
                        *acc_val += val * k;
                    }
                }
                temp_row[c * C..(c + 1) * C].copy_from_slice(&acc);
            }
        });

    // vertical pass
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(r, dst_row)| {
            for (j, out) in dst_row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (i, &k) in kernel_y.iter().enumerate() {
                    let y = replicate_index(r as isize + i as isize - half_y, rows);
                    acc += temp[y * row_stride + j] * k;
                }
                *out = T::from_f32(acc);
            }
        });

    Ok(())
}
