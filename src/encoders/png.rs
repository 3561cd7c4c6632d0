use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;

use crate::plan::Modifiers;
use crate::{am_err, am_try, error::MaskError, image::Image};

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    modifiers: &Modifiers,
) -> Result<(), MaskError> {
    let (compression, filter) = quality_to_compression_parameters(modifiers.quality)?;
    let mut encoder = PngEncoder::new_with_quality(writer, compression, filter);
    if let Some(icc) = image.icc.clone() {
        let _ = encoder.set_icc_profile(icc); // ignore UnsupportedError
    }
    // always RGBA, so that the output can be fed back in
    Ok(am_try!(image.pixels.write_with_encoder(encoder)))
}

// for documentation on conversion of quality to encoding parameters see
// https://www.imagemagick.org/script/command-line-options.php#quality
fn quality_to_compression_parameters(
    quality: Option<f64>,
) -> Result<(CompressionType, FilterType), MaskError> {
    // default is 75 as per https://legacy.imagemagick.org/script/command-line-options.php#quality
    let Some(quality) = quality else {
        return Ok((CompressionType::Level(7), FilterType::Adaptive));
    };
    if quality.is_sign_negative() {
        return Err(am_err!("PNG quality cannot be negative"));
    }
    let quality = quality as u64;
    // large values are treated as 9
    let level = CompressionType::Level((quality / 10).min(9) as u8);

    let parameters = match quality % 10 {
        0 => (level, FilterType::NoFilter),
        1 => (level, FilterType::Sub),
        2 => (level, FilterType::Up),
        3 => (level, FilterType::Avg),
        4 => (level, FilterType::Paeth),
        // 7 is documented as MNG-only
        5..=7 => (level, FilterType::Adaptive),
        // filters 8 and 9 override compression level selection
        8 => (CompressionType::Fast, FilterType::Adaptive),
        // imagemagick uses no filter here, but Fast mode needs filtering
        // for a reasonable compression ratio, so use the fastest filter instead
        _ => (CompressionType::Fast, FilterType::Up),
    };
    Ok(parameters)
}
