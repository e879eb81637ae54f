use segaug_image::{Image, ImageDtype, ImageError};

use crate::{filter, parallel};

fn check_same_size<T, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    Ok(())
}

/// Interpolate between a degenerate image and a source image.
///
/// The formula used is:
///
/// dst(x,y,c) = degenerate(x,y,c) + factor * (src(x,y,c) - degenerate(x,y,c))
///
/// A factor of 0 yields `degenerate`, 1 yields `src`, and larger factors
/// extrapolate away from `degenerate`. Integer outputs are rounded and clamped.
///
/// # Arguments
///
/// * `degenerate` - The image the factor is measured from.
/// * `src` - The source image.
/// * `factor` - The interpolation factor.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the three images do not share the same size.
pub fn blend<T, const C: usize>(
    degenerate: &Image<T, C>,
    src: &Image<T, C>,
    factor: f32,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_same_size(degenerate, src)?;
    check_same_size(src, dst)?;

    parallel::par_iter_rows_two(degenerate, src, dst, |deg_pixel, src_pixel, dst_pixel| {
        for ((out, &d), &s) in dst_pixel.iter_mut().zip(deg_pixel).zip(src_pixel) {
            let (d, s): (f32, f32) = (d.into(), s.into());
            *out = T::from_f32(d + factor * (s - d));
        }
    });

    Ok(())
}

/// Adjust the brightness of an image by blending it with black.
///
/// dst(x,y,c) = src(x,y,c) * factor
///
/// # Example
///
/// ```
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::enhance::adjust_brightness;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let image = Image::<u8, 1>::new(size, vec![100, 250]).unwrap();
/// let mut brighter = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// adjust_brightness(&image, 1.1, &mut brighter).unwrap();
/// assert_eq!(brighter.as_slice(), &[110, 255]);
/// ```
pub fn adjust_brightness<T, const C: usize>(
    src: &Image<T, C>,
    factor: f32,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (out, &val) in dst_pixel.iter_mut().zip(src_pixel) {
            let val: f32 = val.into();
            *out = T::from_f32(val * factor);
        }
    });

    Ok(())
}

/// Mean luma of an RGB image, using the ITU-R 601-2 weights.
///
/// The luma of each pixel is converted to the pixel type before averaging.
pub fn mean_luma<T>(src: &Image<T, 3>) -> f32
where
    T: ImageDtype,
{
    let num_pixels = src.size().area();
    if num_pixels == 0 {
        return 0.0;
    }

    let sum = src
        .as_slice()
        .chunks_exact(3)
        .map(|rgb| {
            let (r, g, b): (f32, f32, f32) = (rgb[0].into(), rgb[1].into(), rgb[2].into());
            let luma: f32 = T::from_f32(0.299 * r + 0.587 * g + 0.114 * b).into();
            luma as f64
        })
        .sum::<f64>();

    (sum / num_pixels as f64) as f32
}

/// Adjust the contrast of an RGB image.
///
/// The image is blended with a uniform grey image whose value is the mean luma
/// of `src`, converted to the pixel type.
pub fn adjust_contrast<T>(
    src: &Image<T, 3>,
    factor: f32,
    dst: &mut Image<T, 3>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_same_size(src, dst)?;

    let mean: f32 = T::from_f32(mean_luma(src)).into();

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (out, &val) in dst_pixel.iter_mut().zip(src_pixel) {
            let val: f32 = val.into();
            *out = T::from_f32(mean + factor * (val - mean));
        }
    });

    Ok(())
}

/// Adjust the sharpness of an image.
///
/// The image is blended with its [`filter::smooth_3x3`] version, whose border
/// pixels equal the source.
pub fn adjust_sharpness<T, const C: usize>(
    src: &Image<T, C>,
    factor: f32,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_same_size(src, dst)?;

    let mut degenerate = Image::from_size_val(src.size(), T::default())?;
    filter::smooth_3x3(src, &mut degenerate)?;

    blend(&degenerate, src, factor, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segaug_image::ImageSize;

    #[test]
    fn test_blend() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let degenerate = Image::<f32, 1>::new(size, vec![0.0, 10.0])?;
        let src = Image::<f32, 1>::new(size, vec![4.0, 20.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        blend(&degenerate, &src, 0.5, &mut dst)?;
        assert_eq!(dst.as_slice(), &[2.0, 15.0]);

        blend(&degenerate, &src, 1.5, &mut dst)?;
        assert_eq!(dst.as_slice(), &[6.0, 25.0]);

        Ok(())
    }

    #[test]
    fn test_adjust_brightness_clamps() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let src = Image::<u8, 3>::new(size, vec![0, 10, 20, 100, 101, 102, 240, 250, 255])?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        adjust_brightness(&src, 1.1, &mut dst)?;

        assert_eq!(
            dst.as_slice(),
            &[0, 11, 22, 110, 111, 112, 255, 255, 255]
        );

        Ok(())
    }

    #[test]
    fn test_adjust_contrast_uniform_is_identity() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            77,
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;

        adjust_contrast(&src, 1.09, &mut dst)?;
        assert_eq!(dst, src);

        Ok(())
    }

    #[test]
    fn test_adjust_contrast_stretches() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let src = Image::<u8, 3>::new(size, vec![100, 100, 100, 200, 200, 200])?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        approx::assert_relative_eq!(mean_luma(&src), 150.0, epsilon = 1e-3);

        adjust_contrast(&src, 1.1, &mut dst)?;
        assert_eq!(dst.as_slice(), &[95, 95, 95, 205, 205, 205]);

        Ok(())
    }

    #[test]
    fn test_mean_luma_rounds_each_pixel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };

        // lumas 0.587 and 0.299 become grey levels 1 and 0
        let src = Image::<u8, 3>::new(size, vec![0, 1, 0, 1, 0, 0])?;
        approx::assert_relative_eq!(mean_luma(&src), 0.5, epsilon = 1e-6);

        let src = Image::<f32, 3>::new(size, vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0])?;
        approx::assert_relative_eq!(mean_luma(&src), 0.443, epsilon = 1e-5);

        Ok(())
    }

    #[test]
    fn test_adjust_sharpness() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![
                13, 13, 13,
                13, 0, 13,
                13, 13, 13,
            ],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        // smoothed centre is 8, so 8 + 2 * (0 - 8) clamps to zero
        adjust_sharpness(&src, 2.0, &mut dst)?;
        assert_eq!(dst.as_slice()[4], 0);
        assert_eq!(dst.as_slice()[0], 13);

        adjust_sharpness(&src, 1.0, &mut dst)?;
        assert_eq!(dst, src);

        Ok(())
    }
}
