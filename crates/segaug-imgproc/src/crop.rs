use segaug_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Crop an image to a specified region.
///
/// The region must lie fully inside `src`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Examples
///
/// ```rust
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.cols() > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::InvalidImageSize(
            x + dst.cols(),
            y + dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src.cols() * C + x * C;
            let src_slice = &src.as_slice()[offset..offset + dst_cols * C];

            // copy the slice to the destination
            dst_row.copy_from_slice(src_slice);
        });

    Ok(())
}

/// Crop an image to a region that may extend past the image borders.
///
/// Pixels of the region that fall outside `src` are set to `fill`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image. Its size defines the size of the region.
/// * `x` - The x-coordinate of the top-left corner, possibly negative.
/// * `y` - The y-coordinate of the top-left corner, possibly negative.
/// * `fill` - The pixel value used outside the source image.
///
/// # Examples
///
/// ```rust
/// use segaug_image::{Image, ImageSize};
/// use segaug_imgproc::crop::crop_image_padded;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 2 }, vec![1u8, 2, 3, 4]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 9u8).unwrap();
///
/// crop_image_padded(&image, &mut cropped, -1, -1, [0]).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[
///     0u8, 0, 0, 0,
///     0u8, 1, 2, 0,
///     0u8, 3, 4, 0,
///     0u8, 0, 0, 0,
/// ]);
/// ```
pub fn crop_image_padded<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: isize,
    y: isize,
    fill: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    let (src_cols, src_rows) = (src.cols() as isize, src.rows() as isize);

    // columns of the destination row that read from inside the source
    let col_start = (-x).clamp(0, dst_cols as isize) as usize;
    let col_end = (src_cols - x).clamp(0, dst_cols as isize) as usize;

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .for_each(|pixel| pixel.copy_from_slice(&fill));

            let sy = y + i as isize;
            if sy < 0 || sy >= src_rows || col_start >= col_end {
                return;
            }

            let sx = (x + col_start as isize) as usize;
            let offset = (sy as usize * src.cols() + sx) * C;
            let len = (col_end - col_start) * C;
            dst_row[col_start * C..col_end * C]
                .copy_from_slice(&src.as_slice()[offset..offset + len]);
        });

    Ok(())
}

/// Compute the top-left corner of a centred crop of `crop_size` inside `size`.
///
/// Offsets use floor division, so they are negative when the crop is larger
/// than the image.
///
/// # Examples
///
/// ```rust
/// use segaug_image::ImageSize;
/// use segaug_imgproc::crop::center_crop_origin;
///
/// let size = ImageSize { width: 5, height: 3 };
/// let crop = ImageSize { width: 2, height: 4 };
///
/// assert_eq!(center_crop_origin(size, crop), (1, -1));
/// ```
pub fn center_crop_origin(size: ImageSize, crop_size: ImageSize) -> (isize, isize) {
    let dx = size.width as isize - crop_size.width as isize;
    let dy = size.height as isize - crop_size.height as isize;
    (dx.div_euclid(2), dy.div_euclid(2))
}

/// Crop the centre region of `src` with the size of `dst`, padding with `fill`.
///
/// Regions that fit inside `src` are copied with [`crop_image`].
pub fn center_crop<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    fill: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let (x, y) = center_crop_origin(src.size(), dst.size());
    if x >= 0 && y >= 0 {
        return crop_image(src, dst, x as usize, y as usize);
    }
    crop_image_padded(src, dst, x, y, fill)
}

#[cfg(test)]
mod tests {
    use segaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_crop() -> Result<(), ImageError> {
        let image_size = ImageSize {
            width: 2,
            height: 3,
        };

        #[rustfmt::skip]
        let image = Image::<_, 3>::new(
            image_size,
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let data_expected = vec![9u8, 10, 11, 15, 16, 17];

        let crop_size = ImageSize {
            width: 1,
            height: 2,
        };

        let mut cropped = Image::<_, 3>::from_size_val(crop_size, 0u8)?;

        super::crop_image(&image, &mut cropped, 1, 1)?;

        assert_eq!(cropped.as_slice(), &data_expected);

        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
        )?;
        let mut cropped = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        let res = super::crop_image(&image, &mut cropped, 1, 0);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }

    #[test]
    fn test_crop_padded_inside_matches_crop() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            (0..18).collect(),
        )?;
        let size = ImageSize {
            width: 2,
            height: 2,
        };

        let mut expected = Image::<u8, 2>::from_size_val(size, 0)?;
        super::crop_image(&image, &mut expected, 1, 0)?;

        let mut padded = Image::<u8, 2>::from_size_val(size, 0)?;
        super::crop_image_padded(&image, &mut padded, 1, 0, [0, 0])?;

        assert_eq!(padded.as_slice(), expected.as_slice());

        Ok(())
    }

    #[test]
    fn test_crop_padded_partial() -> Result<(), ImageError> {
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

        let mut cropped = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            7,
        )?;
        super::crop_image_padded(&image, &mut cropped, 1, 1, [0])?;

        #[rustfmt::skip]
        let expected = [
            5, 6, 0,
            0, 0, 0,
            0, 0, 0,
        ];
        assert_eq!(cropped.as_slice(), &expected);

        // region entirely outside the source
        super::crop_image_padded(&image, &mut cropped, 10, -10, [3])?;
        assert!(cropped.as_slice().iter().all(|&v| v == 3));

        Ok(())
    }

    #[test]
    fn test_center_crop_shrink_and_grow() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            vec![
                0, 1, 2, 3,
                4, 5, 6, 7,
                8, 9, 10, 11,
                12, 13, 14, 15,
            ],
        )?;

        let mut small = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        super::center_crop(&image, &mut small, [0])?;
        assert_eq!(small.as_slice(), &[5, 6, 9, 10]);

        let mut large = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 6,
                height: 4,
            },
            9,
        )?;
        super::center_crop(&image, &mut large, [0])?;
        assert_eq!(&large.as_slice()[..6], &[0, 0, 1, 2, 3, 0]);

        Ok(())
    }
}
