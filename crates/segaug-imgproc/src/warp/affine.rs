use segaug_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Cosine and sine of an angle in degrees, rounded to 15 decimals.
///
/// Rounding removes the residue of `cos(90°)` and friends, so quarter turns
/// map pixel grids onto each other exactly.
fn cos_sin_deg(angle: f32) -> (f64, f64) {
    let theta = (angle as f64).to_radians();
    let round = |x: f64| (x * 1e15).round() / 1e15;
    (round(theta.cos()), round(theta.sin()))
}

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // follow OpenCV: check for determinant == 0
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// Positive angles rotate counter-clockwise as displayed (y axis pointing down).
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use segaug_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((0.0, 0.0), 90.0, 1.0);
/// assert_eq!(m, [0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let (cos, sin) = cos_sin_deg(angle);
    let alpha = scale * cos as f32;
    let beta = scale * sin as f32;

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// The matrix maps source coordinates to destination coordinates. Coordinates
/// are continuous: pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)`. Destination
/// pixels whose centre maps outside the source are left untouched.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 2x3 affine transformation matrix.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::interpolation::InterpolationMode;
/// use segaug_imgproc::warp::warp_affine;
///
/// let src = Image::<_, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<_, 3>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);
    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let (u, v) = transform_point(x as f32 + 0.5, y as f32 + 0.5, &m_inv);

        // check if the position is within the bounds of the src image
        if u >= 0.0 && u < src_cols && v >= 0.0 && v < src_rows {
            let pixel = interpolate_pixel(src, u - 0.5, v - 0.5, interpolation);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(out, &val)| *out = T::from_f32(val));
        }
    });

    Ok(())
}

/// Number of counter-clockwise quarter turns in `angle`, if it is a multiple of 90 degrees.
fn quarter_turns(angle: f32) -> Option<usize> {
    let angle = angle.rem_euclid(360.0);
    (angle % 90.0 == 0.0).then(|| (angle / 90.0) as usize % 4)
}

/// Compute the size of the canvas that holds `size` rotated by `angle` degrees.
///
/// Multiples of 90 degrees keep or swap the sides exactly.
///
/// # Example
///
/// ```
/// use segaug_image::ImageSize;
/// use segaug_imgproc::warp::rotated_bounds;
///
/// let size = ImageSize { width: 3, height: 2 };
/// assert_eq!(rotated_bounds(size, 90.0), ImageSize { width: 2, height: 3 });
/// ```
pub fn rotated_bounds(size: ImageSize, angle: f32) -> ImageSize {
    if let Some(turns) = quarter_turns(angle) {
        return if turns % 2 == 0 {
            size
        } else {
            ImageSize {
                width: size.height,
                height: size.width,
            }
        };
    }

    let (cos, sin) = cos_sin_deg(angle);
    let (w, h) = (size.width as f64, size.height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);

    for (x, y) in [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)] {
        let (dx, dy) = (x - cx, y - cy);
        let xr = cos * dx + sin * dy + cx;
        let yr = -sin * dx + cos * dy + cy;
        min_x = min_x.min(xr);
        max_x = max_x.max(xr);
        min_y = min_y.min(yr);
        max_y = max_y.max(yr);
    }

    ImageSize {
        width: (max_x.ceil() - min_x.floor()) as usize,
        height: (max_y.ceil() - min_y.floor()) as usize,
    }
}

/// Rotate an image by `turns` counter-clockwise quarter turns by moving pixels.
fn rotate_quarter<T, const C: usize>(
    src: &Image<T, C>,
    turns: usize,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    let (w, h) = (src.cols(), src.rows());
    let new_size = rotated_bounds(src.size(), 90.0 * turns as f32);
    let mut dst = Image::from_size_val(new_size, T::default())?;
    let data = src.as_slice();

    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        let (sx, sy) = match turns {
            1 => (w - 1 - y, x),
            2 => (w - 1 - x, h - 1 - y),
            _ => (y, h - 1 - x),
        };
        let offset = (sy * w + sx) * C;
        dst_pixel.copy_from_slice(&data[offset..offset + C]);
    });

    Ok(dst)
}

/// Rotate an image counter-clockwise about its centre, expanding the canvas.
///
/// The output is large enough to hold the whole rotated image; uncovered
/// pixels are zero. Multiples of 90 degrees move pixels without resampling.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `angle` - The angle of rotation in degrees.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The rotated image with the size given by [`rotated_bounds`].
pub fn rotate_expand<T, const C: usize>(
    src: &Image<T, C>,
    angle: f32,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    match quarter_turns(angle) {
        Some(0) => return Ok(src.clone()),
        Some(turns) if src.size().area() > 0 => return rotate_quarter(src, turns),
        _ => {}
    }

    let new_size = rotated_bounds(src.size(), angle);
    let mut dst = Image::from_size_val(new_size, T::default())?;

    // rotate about the source centre and move it onto the canvas centre
    let (cx, cy) = (src.cols() as f32 / 2.0, src.rows() as f32 / 2.0);
    let mut m = get_rotation_matrix2d((cx, cy), angle.rem_euclid(360.0), 1.0);
    m[2] += new_size.width as f32 / 2.0 - cx;
    m[5] += new_size.height as f32 / 2.0 - cy;

    warp_affine(src, &mut dst, &m, interpolation)?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use crate::flip::{horizontal_flip, vertical_flip};
    use crate::interpolation::InterpolationMode;
    use segaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn warp_affine_smoke_ch3() -> Result<(), ImageError> {
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

        let mut image_transformed = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.num_channels(), 3);
        assert_eq!(image_transformed.size().width, 2);
        assert_eq!(image_transformed.size().height, 3);

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_identity() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            (0..20).map(|x| x as f32).collect(),
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_rot90() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0f32, 1.0f32, 2.0f32, 3.0f32],
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &super::get_rotation_matrix2d((1.0, 1.0), 90.0, 1.0),
            InterpolationMode::Nearest,
        )?;

        assert_eq!(
            image_transformed.as_slice(),
            &[1.0f32, 3.0f32, 0.0f32, 2.0f32]
        );

        Ok(())
    }

    #[test]
    fn invert_affine_roundtrip() {
        let m = super::get_rotation_matrix2d((3.0, 2.0), 30.0, 1.5);
        let m_inv = super::invert_affine_transform(&m);
        let (u, v) = super::transform_point(1.0, 4.0, &m);
        let (x, y) = super::transform_point(u, v, &m_inv);
        approx::assert_relative_eq!(x, 1.0, epsilon = 1e-4);
        approx::assert_relative_eq!(y, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn rotated_bounds_quarter_turns() {
        let size = ImageSize {
            width: 5,
            height: 3,
        };
        assert_eq!(super::rotated_bounds(size, 0.0), size);
        assert_eq!(super::rotated_bounds(size, 180.0), size);
        assert_eq!(
            super::rotated_bounds(size, 270.0),
            ImageSize {
                width: 3,
                height: 5
            }
        );

        assert_eq!(
            super::rotated_bounds(
                ImageSize {
                    width: 3,
                    height: 2
                },
                90.0
            ),
            ImageSize {
                width: 2,
                height: 3
            }
        );
        assert_eq!(
            super::rotated_bounds(
                ImageSize {
                    width: 3,
                    height: 2
                },
                -90.0
            ),
            ImageSize {
                width: 2,
                height: 3
            }
        );

        let diagonal = super::rotated_bounds(
            ImageSize {
                width: 10,
                height: 10,
            },
            45.0,
        );
        assert_eq!(diagonal.width, diagonal.height);
        assert!(diagonal.width >= 15);
    }

    #[test]
    fn rotate_expand_zero_is_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?;

        let rotated = super::rotate_expand(&image, 0.0, InterpolationMode::Nearest)?;
        assert_eq!(rotated, image);

        let rotated = super::rotate_expand(&image, 360.0, InterpolationMode::Nearest)?;
        assert_eq!(rotated, image);

        Ok(())
    }

    #[test]
    fn rotate_expand_half_turn_flips_both_axes() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            (0..18).collect(),
        )?;

        let rotated = super::rotate_expand(&image, 180.0, InterpolationMode::Nearest)?;

        let mut hflipped = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        horizontal_flip(&image, &mut hflipped)?;
        let mut expected = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        vertical_flip(&hflipped, &mut expected)?;

        assert_eq!(rotated, expected);

        Ok(())
    }

    #[test]
    fn rotate_expand_quarter_turn() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![
                1, 2, 3,
                4, 5, 6,
            ],
        )?;

        let rotated = super::rotate_expand(&image, 90.0, InterpolationMode::Nearest)?;

        #[rustfmt::skip]
        let expected = [
            3, 6,
            2, 5,
            1, 4,
        ];
        assert_eq!(
            rotated.size(),
            ImageSize {
                width: 2,
                height: 3
            }
        );
        assert_eq!(rotated.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn rotate_expand_three_quarter_turn() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![
                1, 10, 2, 20, 3, 30,
                4, 40, 5, 50, 6, 60,
            ],
        )?;

        let rotated = super::rotate_expand(&image, 270.0, InterpolationMode::Bilinear)?;

        #[rustfmt::skip]
        let expected = [
            4, 40, 1, 10,
            5, 50, 2, 20,
            6, 60, 3, 30,
        ];
        assert_eq!(
            rotated.size(),
            ImageSize {
                width: 2,
                height: 3
            }
        );
        assert_eq!(rotated.as_slice(), &expected);

        Ok(())
    }

    #[test]
    fn rotate_expand_generic_angle_keeps_centre() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 9,
                height: 6,
            },
            200,
        )?;

        let rotated = super::rotate_expand(&image, 30.0, InterpolationMode::Nearest)?;
        let size = rotated.size();

        assert!(size.width > 9 && size.height > 6);
        assert_eq!(rotated.get([0, 0, 0]), Some(&0));
        assert_eq!(rotated.get([size.height / 2, size.width / 2, 0]), Some(&200));

        Ok(())
    }
}
