use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;
use segaug_image::{Image, ImageDtype, ImageError, ImageSize};

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified
/// interpolation mode. It supports any number of channels and data types.
///
/// Output pixel centres are mapped onto the source grid, so that scaling by one
/// reproduces the input exactly and the image content stays centred.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container. Its size defines the new size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::resize::resize_native;
/// use segaug_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// Returns an error if the source image is empty while the destination is not.
pub fn resize_native<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if dst.size().area() == 0 {
        return Ok(());
    }

    if src.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let scale_x = src.cols() as f32 / dst.cols() as f32;
    let scale_y = src.rows() as f32 / dst.rows() as f32;

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let u = (x as f32 + 0.5) * scale_x - 0.5;
        let v = (y as f32 + 0.5) * scale_y - 0.5;

        let pixel = interpolate_pixel(src, u, v, interpolation);

        dst_pixel
            .iter_mut()
            .zip(pixel.iter())
            .for_each(|(out, &val)| *out = T::from_f32(val));
    });

    Ok(())
}

/// Resize an image to `new_size`, allocating the output.
///
/// Convenience wrapper over [`resize_native`].
pub fn resize<T, const C: usize>(
    src: &Image<T, C>,
    new_size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    let mut dst = Image::from_size_val(new_size, T::default())?;
    resize_native(src, &mut dst, interpolation)?;
    Ok(dst)
}

/// Compute the size of an image scaled by `scale`.
///
/// Each side is rounded half to even.
pub fn scaled_size(size: ImageSize, scale: f32) -> ImageSize {
    ImageSize {
        width: (size.width as f32 * scale).round_ties_even() as usize,
        height: (size.height as f32 * scale).round_ties_even() as usize,
    }
}

#[cfg(test)]
mod tests {
    use crate::interpolation::InterpolationMode;
    use segaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size().width, 2);
        assert_eq!(image_resized.size().height, 3);

        Ok(())
    }

    #[test]
    fn resize_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 10, 20, 30, 40, 50],
        )?;

        let resized = super::resize(&image, image.size(), InterpolationMode::Bilinear)?;
        assert_eq!(resized.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn resize_nearest_upscale() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0, 255],
        )?;

        let resized = super::resize(
            &image,
            ImageSize {
                width: 4,
                height: 2,
            },
            InterpolationMode::Nearest,
        )?;

        assert_eq!(resized.as_slice(), &[0, 0, 255, 255, 0, 0, 255, 255]);

        Ok(())
    }

    #[test]
    fn resize_bilinear_constant() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 200,
                height: 100,
            },
            255,
        )?;

        let resized = super::resize(
            &image,
            ImageSize {
                width: 64,
                height: 64,
            },
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(resized.size().width, 64);
        assert_eq!(resized.size().height, 64);
        assert!(resized.as_slice().iter().all(|&v| v == 255));

        Ok(())
    }

    #[test]
    fn resize_empty_source() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        let res = super::resize_native(&image, &mut dst, InterpolationMode::Nearest);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }

    #[test]
    fn scaled_size_rounds() {
        let size = ImageSize {
            width: 10,
            height: 7,
        };
        assert_eq!(
            super::scaled_size(size, 1.25),
            ImageSize {
                width: 12,
                height: 9
            }
        );
        assert_eq!(
            super::scaled_size(size, 0.75),
            ImageSize {
                width: 8,
                height: 5
            }
        );
    }
}
