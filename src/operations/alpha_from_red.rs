use image::{DynamicImage, Rgba, RgbaImage};

use crate::{
    am_err,
    arg_parsers::{Rounding, ScaleFactor},
    error::MaskError,
    image::Image,
};

/// Replaces every pixel with black whose alpha is `(255 - red) * factor`, clamped to 0..=255.
///
/// The image must be RGBA. Any bit depth is accepted; the result is always 8-bit RGBA.
pub fn alpha_from_red(
    image: &mut Image,
    factor: ScaleFactor,
    rounding: Rounding,
) -> Result<(), MaskError> {
    let color = image.pixels.color();
    if !color.has_alpha() {
        return Err(am_err!("image has no alpha channel ({color:?})"));
    }
    if color.channel_count() != 4 {
        return Err(am_err!(
            "expected 4 channels (RGBA), found {} ({color:?})",
            color.channel_count()
        ));
    }

    if let DynamicImage::ImageRgba8(pixels) = &mut image.pixels {
        apply(pixels, factor, rounding);
    } else {
        let mut pixels = image.pixels.to_rgba8();
        apply(&mut pixels, factor, rounding);
        image.pixels = DynamicImage::ImageRgba8(pixels);
    }
    Ok(())
}

/// The new alpha for a pixel with the given red channel.
pub fn alpha_for_red(red: u8, factor: ScaleFactor, rounding: Rounding) -> u8 {
    let scaled = f64::from(255 - red) * factor.get();
    rounding.apply(scaled).clamp(0.0, 255.0) as u8
}

fn apply(pixels: &mut RgbaImage, factor: ScaleFactor, rounding: Rounding) {
    // the output only depends on the red channel, so there are just 256 possible outputs
    let mut table = [0u8; 256];
    for (red, alpha) in table.iter_mut().enumerate() {
        *alpha = alpha_for_red(red as u8, factor, rounding);
    }

    // row-major: y outer, x inner
    for pixel in pixels.pixels_mut() {
        *pixel = Rgba([0, 0, 0, table[pixel[0] as usize]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba32FImage};
    use quickcheck_macros::quickcheck;

    type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

    fn factor(k: f64) -> ScaleFactor {
        ScaleFactor::new(k).unwrap()
    }

    fn image_from(pixels: RgbaImage) -> Image {
        Image {
            format: None,
            icc: None,
            pixels: DynamicImage::ImageRgba8(pixels),
        }
    }

    fn transform_one(pixel: [u8; 4], k: f64, rounding: Rounding) -> Rgba<u8> {
        let mut image = image_from(RgbaImage::from_pixel(1, 1, Rgba(pixel)));
        alpha_from_red(&mut image, factor(k), rounding).unwrap();
        *image.pixels.as_rgba8().unwrap().get_pixel(0, 0)
    }

    #[test]
    fn white_becomes_transparent() {
        assert_eq!(
            transform_one([255, 255, 255, 255], 1.0, Rounding::Nearest),
            Rgba([0, 0, 0, 0])
        );
    }

    #[test]
    fn black_becomes_opaque() {
        assert_eq!(
            transform_one([0, 0, 0, 255], 1.0, Rounding::Nearest),
            Rgba([0, 0, 0, 255])
        );
    }

    #[test]
    fn half_factor_rounds_half_up() {
        // (255 - 100) * 0.5 = 77.5
        assert_eq!(
            transform_one([100, 50, 50, 255], 0.5, Rounding::Nearest),
            Rgba([0, 0, 0, 78])
        );
        assert_eq!(
            transform_one([100, 50, 50, 255], 0.5, Rounding::Truncate),
            Rgba([0, 0, 0, 77])
        );
    }

    #[test]
    fn ninety_percent_factor() {
        // 245 * 0.9 = 220.5 in f64, an f32 computation would land just below
        assert_eq!(
            transform_one([10, 0, 0, 255], 0.9, Rounding::Nearest),
            Rgba([0, 0, 0, 221])
        );
        assert_eq!(
            transform_one([10, 0, 0, 255], 0.9, Rounding::Truncate),
            Rgba([0, 0, 0, 220])
        );
    }

    #[test]
    fn large_factor_is_clamped() {
        assert_eq!(
            transform_one([0, 0, 0, 255], 2.0, Rounding::Nearest),
            Rgba([0, 0, 0, 255])
        );
        assert_eq!(
            transform_one([200, 0, 0, 255], 1000.0, Rounding::Truncate),
            Rgba([0, 0, 0, 255])
        );
    }

    #[test]
    fn zero_factor_is_fully_transparent() {
        assert_eq!(
            transform_one([0, 10, 20, 30], 0.0, Rounding::Nearest),
            Rgba([0, 0, 0, 0])
        );
    }

    #[test]
    fn original_alpha_is_ignored() {
        assert_eq!(
            transform_one([55, 1, 2, 0], 1.0, Rounding::Nearest),
            Rgba([0, 0, 0, 200])
        );
    }

    #[test]
    fn applying_twice_is_not_idempotent() {
        let gradient: RgbaImage =
            ImageBuffer::from_fn(16, 1, |x, _| Rgba([(x * 16) as u8, 0, 0, 255]));
        let mut once = image_from(gradient);
        alpha_from_red(&mut once, factor(1.0), Rounding::Nearest).unwrap();
        let mut twice = once.clone();
        alpha_from_red(&mut twice, factor(1.0), Rounding::Nearest).unwrap();

        assert_ne!(once.pixels, twice.pixels);
        // the first run zeroed every red channel, so the second one makes everything opaque
        assert!(twice.pixels.as_rgba8().unwrap().pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn rejects_images_without_alpha() {
        let mut image = Image {
            format: None,
            icc: None,
            pixels: DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))),
        };
        assert!(alpha_from_red(&mut image, factor(1.0), Rounding::Nearest).is_err());
        // untouched on failure
        assert_eq!(image.pixels.as_rgb8().unwrap().get_pixel(1, 1), &Rgb([1, 2, 3]));
    }

    #[test]
    fn rejects_grayscale_with_alpha() {
        let mut image = Image {
            format: None,
            icc: None,
            pixels: DynamicImage::new_luma_a8(2, 2),
        };
        assert!(alpha_from_red(&mut image, factor(1.0), Rounding::Nearest).is_err());
    }

    #[test]
    fn converts_other_rgba_depths_to_8_bit() {
        let mut image = Image {
            format: None,
            icc: None,
            pixels: DynamicImage::ImageRgba32F(Rgba32FImage::from_pixel(
                3,
                2,
                Rgba([1.0, 0.5, 0.5, 1.0]),
            )),
        };
        alpha_from_red(&mut image, factor(1.0), Rounding::Nearest).unwrap();
        let pixels = image.pixels.as_rgba8().unwrap();
        assert_eq!(pixels.dimensions(), (3, 2));
        assert!(pixels.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn accepts_16_bit_rgba() {
        // what a 16-bit PNG decodes to; 0x6464 becomes 100 in 8 bits
        let mut image = Image {
            format: None,
            icc: None,
            pixels: DynamicImage::ImageRgba16(Rgba16Image::from_pixel(
                2,
                3,
                Rgba([0x6464, 0x3232, 0x3232, 0xffff]),
            )),
        };
        alpha_from_red(&mut image, factor(0.5), Rounding::Nearest).unwrap();
        let pixels = image.pixels.as_rgba8().unwrap();
        assert_eq!(pixels.dimensions(), (2, 3));
        assert!(pixels.pixels().all(|p| *p == Rgba([0, 0, 0, 78])));
    }

    #[test]
    fn empty_image_is_a_no_op() {
        let mut image = image_from(RgbaImage::new(0, 0));
        alpha_from_red(&mut image, factor(0.5), Rounding::Nearest).unwrap();
        assert_eq!((image.pixels.width(), image.pixels.height()), (0, 0));
    }

    fn transform_row(
        data: &[(u8, u8, u8, u8)],
        k: ScaleFactor,
        rounding: Rounding,
    ) -> (RgbaImage, RgbaImage) {
        let original: RgbaImage = ImageBuffer::from_fn(data.len() as u32, 1, |x, _| {
            let (r, g, b, a) = data[x as usize];
            Rgba([r, g, b, a])
        });
        let mut image = image_from(original.clone());
        alpha_from_red(&mut image, k, rounding).unwrap();
        let result = image.pixels.as_rgba8().unwrap().clone();
        assert_eq!(result.dimensions(), original.dimensions());
        (original, result)
    }

    /// Factors with a power-of-two denominator are exact in f64,
    /// so the expected alpha can be computed in integers.
    #[quickcheck]
    fn alpha_matches_integer_arithmetic(
        data: Vec<(u8, u8, u8, u8)>,
        numerator: u16,
        truncate: bool,
    ) {
        const DENOMINATOR: u64 = 1024;
        let rounding = if truncate {
            Rounding::Truncate
        } else {
            Rounding::Nearest
        };
        let k = factor(f64::from(numerator) / DENOMINATOR as f64);
        let (original, result) = transform_row(&data, k, rounding);

        for (before, after) in original.pixels().zip(result.pixels()) {
            let product = u64::from(255 - before[0]) * u64::from(numerator);
            let expected = if truncate {
                product / DENOMINATOR
            } else {
                // half away from zero, everything here is non-negative
                (2 * product + DENOMINATOR) / (2 * DENOMINATOR)
            };
            assert_eq!(*after, Rgba([0, 0, 0, expected.min(255) as u8]));
        }
    }

    #[quickcheck]
    fn alpha_never_increases_with_red(
        data: Vec<(u8, u8, u8, u8)>,
        k: ScaleFactor,
        truncate: bool,
    ) {
        let rounding = if truncate {
            Rounding::Truncate
        } else {
            Rounding::Nearest
        };
        let (original, result) = transform_row(&data, k, rounding);

        let mut pairs: Vec<(u8, u8)> = original
            .pixels()
            .zip(result.pixels())
            .map(|(before, after)| {
                assert_eq!(&after.0[..3], &[0, 0, 0]);
                (before[0], after[3])
            })
            .collect();
        pairs.sort();
        for window in pairs.windows(2) {
            assert!(window[0].1 >= window[1].1, "{pairs:?}");
        }
        if let Some(&(_, alpha)) = pairs.iter().find(|(red, _)| *red == 255) {
            assert_eq!(alpha, 0);
        }
    }
}
