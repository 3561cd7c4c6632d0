use std::{
    ffi::OsStr,
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use image::ImageFormat;

use crate::{
    am_err, am_try,
    arg_parsers::{FileFormat, Location},
    encoders,
    error::MaskError,
    image::Image,
    plan::Modifiers,
};

pub fn encode(
    image: &mut Image,
    location: &Location,
    format: Option<FileFormat>,
    modifiers: &Modifiers,
) -> Result<(), MaskError> {
    let format = match format {
        // no-op, return immediately
        Some(FileFormat::DoNotEncode) => return Ok(()),
        Some(FileFormat::Format(fmt)) => Some(fmt),
        None => None,
    };

    // Strip here once and for all, without trusting any individual format handlers.
    let icc = if modifiers.strip {
        image.icc.take()
    } else {
        None
    };

    let result = encode_inner(image, location, format, modifiers);

    // put the profile back so that the image is the same as before the call
    if icc.is_some() {
        image.icc = icc;
    }

    result
}

fn encode_inner(
    image: &Image,
    location: &Location,
    format: Option<ImageFormat>,
    modifiers: &Modifiers,
) -> Result<(), MaskError> {
    let format = choose_encoding_format(image, location, format)?;

    let file = match location {
        // `File::create` automatically truncates (overwrites) the file if it exists.
        Location::Path(path) => File::create(path)
            .map_err(|error| am_err!("unable to open image `{}': {error}", path.display()))?,
        // Some of the encoders require Seek, which Stdout doesn't implement.
        // We write to a temporary file and then print out the content at the end.
        Location::Stdio => am_try!(tempfile::tempfile()),
    };
    let mut writer = BufWriter::new(file);

    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => encoders::png::encode(image, &mut writer, modifiers)?,
        _ => am_try!(image.pixels.write_to(&mut writer, format)),
    }

    match location {
        Location::Path(_) => {
            // The buffers would be flushed on drop too, but that would swallow any errors.
            am_try!(writer.flush());
        }
        Location::Stdio => {
            let mut file = am_try!(writer.into_inner());
            am_try!(file.seek(std::io::SeekFrom::Start(0)));
            let mut stdout = std::io::stdout().lock();
            am_try!(std::io::copy(&mut file, &mut stdout));
            am_try!(stdout.flush());
        }
    }

    Ok(())
}

fn choose_encoding_format(
    image: &Image,
    location: &Location,
    explicitly_specified: Option<ImageFormat>,
) -> Result<ImageFormat, MaskError> {
    if let Some(format) = explicitly_specified {
        return Ok(format);
    }
    // if format was not explicitly specified, guess based on the output path
    if let Location::Path(path) = location {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Ok(format);
        }
    }
    // if that fails, use the input format (like ImageMagick)
    if let Some(format) = image.format {
        return Ok(format);
    }
    let extension = match location {
        Location::Path(path) => Path::new(path).extension().unwrap_or(OsStr::new("")),
        Location::Stdio => OsStr::new(""),
    };
    Err(am_err!(
        "no encode delegate for this image format `{}'",
        extension.to_ascii_uppercase().to_string_lossy()
    ))
}
