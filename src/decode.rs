use std::io::{BufRead, Cursor, Read, Seek};

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};

use crate::{
    arg_parsers::{FileFormat, Location},
    am_err, am_try,
    error::MaskError,
    image::Image,
};

/// If the format has not been explicitly specified, guesses the format based on file contents.
pub fn decode(location: &Location, format: Option<FileFormat>) -> Result<Image, MaskError> {
    let format = match format {
        Some(FileFormat::Format(format)) => Some(format),
        Some(FileFormat::DoNotEncode) => {
            return Err(am_err!("cannot read an image from `null:'"));
        }
        None => None,
    };

    match location {
        Location::Path(path) => {
            let reader = ImageReader::open(path)
                .map_err(|error| am_err!("unable to open image `{}': {error}", path.display()))?;
            decode_inner(reader, format)
        }
        Location::Stdio => {
            // The format guessing needs Seek, which Stdin doesn't implement
            let mut buffer = Vec::new();
            am_try!(std::io::stdin().lock().read_to_end(&mut buffer));
            decode_inner(ImageReader::new(Cursor::new(buffer)), format)
        }
    }
}

fn decode_inner<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
    format: Option<ImageFormat>,
) -> Result<Image, MaskError> {
    match format {
        Some(format) => reader.set_format(format),
        None => reader = am_try!(reader.with_guessed_format()),
    }
    let format = reader.format();
    let mut decoder = am_try!(reader.into_decoder());
    // a broken ICC profile is not worth failing the whole decode over
    let icc = decoder.icc_profile().unwrap_or(None);
    let pixels = am_try!(DynamicImage::from_decoder(decoder));
    Ok(Image {
        format,
        icc,
        pixels,
    })
}

