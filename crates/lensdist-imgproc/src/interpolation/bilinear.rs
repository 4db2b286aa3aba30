use super::interpolate::sampling_footprint;
use lensdist_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values clamped to the sample range of `T`, or `None`
/// when the 2x2 neighbourhood is not inside the image. Integer samples are
/// truncated toward zero.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f64,
    v: f64,
) -> Option<[T; C]> {
    let cols = image.cols();
    let (iu, iv) = sampling_footprint(u, v, cols, image.rows())?;

    let a = u - iu as f64;
    let b = v - iv as f64;

    let w11 = (1.0 - a) * (1.0 - b);
    let w21 = a * (1.0 - b);
    let w12 = (1.0 - a) * b;
    let w22 = a * b;

    // top-left, top-right, bottom-left, bottom-right
    let base11 = (iv * cols + iu) * C;
    let base21 = base11 + C;
    let base12 = ((iv + 1) * cols + iu) * C;
    let base22 = base12 + C;

    let data = image.as_slice();

    let mut pixel = [T::default(); C];
    for (k, px) in pixel.iter_mut().enumerate() {
        let value = w11 * data[base11 + k].to_f64()
            + w21 * data[base21 + k].to_f64()
            + w12 * data[base12 + k].to_f64()
            + w22 * data[base22 + k].to_f64();
        *px = T::from_f64(value);
    }

    Some(pixel)
}

#[cfg(test)]
mod tests {
    use super::bilinear_interpolation;
    use lensdist_image::{Image, ImageError, ImageSize};

    fn ramp() -> Result<Image<f32, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 8,
                height: 8,
            },
            (0..64).map(|v| v as f32).collect(),
        )
    }

    #[test]
    fn bilinear_exact_at_integer_location() -> Result<(), ImageError> {
        let image = ramp()?;
        assert_eq!(bilinear_interpolation(&image, 5.0, 5.0), Some([45.0]));
        Ok(())
    }

    #[test]
    fn bilinear_weights() -> Result<(), ImageError> {
        let image = ramp()?;
        // I11 = 9, I21 = 10, I12 = 17, I22 = 18
        let [value] = bilinear_interpolation(&image, 1.25, 1.5).unwrap();
        let expected = 0.75 * 0.5 * 9.0 + 0.25 * 0.5 * 10.0 + 0.75 * 0.5 * 17.0 + 0.25 * 0.5 * 18.0;
        assert!((value - expected).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn bilinear_clamps_to_u8_range() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                255, 0, 10, 255, 0, 20, //
                255, 0, 30, 255, 0, 40,
            ],
        )?;
        assert_eq!(bilinear_interpolation(&image, 0.5, 0.5), Some([255, 0, 25]));
        Ok(())
    }

    #[test]
    fn bilinear_truncates_integer_blend() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![10, 11, 10, 11],
        )?;
        // 0.25 * 10 + 0.75 * 11 = 10.75
        assert_eq!(bilinear_interpolation(&image, 0.75, 0.0), Some([10]));

        let image = Image::<u16, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![100, 200, 100, 200],
        )?;
        assert_eq!(bilinear_interpolation(&image, 0.999, 0.5), Some([199]));
        Ok(())
    }

    #[test]
    fn bilinear_out_of_bounds() -> Result<(), ImageError> {
        let image = ramp()?;
        assert_eq!(bilinear_interpolation(&image, -0.5, 3.0), None);
        assert_eq!(bilinear_interpolation(&image, 7.0, 3.0), None);
        assert_eq!(bilinear_interpolation(&image, 3.0, 7.5), None);
        assert_eq!(bilinear_interpolation(&image, 6.99, 6.99).map(|_| ()), Some(()));
        Ok(())
    }
}
