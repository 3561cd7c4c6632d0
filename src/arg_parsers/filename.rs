use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use image::ImageFormat;

/// Where an image is read from or written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    /// `-` on the command line: stdin for inputs, stdout for the output.
    #[default]
    Stdio,
}

impl Location {
    pub fn display(&self) -> std::path::Display<'_> {
        match self {
            Location::Path(path) => path.display(),
            Location::Stdio => Path::new("-").display(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Format(ImageFormat),
    /// Encoding operation is present but is a no-op. On the CLI this is "null:" passed as filename.
    DoNotEncode,
}

impl FileFormat {
    /// Creates a format from the explicit specifier that precedes the filename,
    /// e.g. `png:my-file` or `null:`
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let lowercase_prefix = prefix.to_ascii_lowercase();
        let format = if lowercase_prefix == "null" {
            Self::DoNotEncode
        } else {
            Self::Format(ImageFormat::from_extension(lowercase_prefix)?)
        };
        Some(format)
    }
}

/// A filename argument split into the location and the optional explicit format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileArg {
    pub location: Location,
    pub format: Option<FileFormat>,
}

impl FileArg {
    pub fn parse(input: &OsStr) -> Self {
        // A file literally named "png:foo" takes precedence over the prefix syntax
        if Path::new(input).is_file() {
            return Self {
                location: location_from(input),
                format: None,
            };
        }
        match split_off_format_prefix(input) {
            Some((format, rest)) => Self {
                location: location_from(&rest),
                format: Some(format),
            },
            None => Self {
                location: location_from(input),
                format: None,
            },
        }
    }
}

fn location_from(path: &OsStr) -> Location {
    // "null:" leaves an empty path behind, which nothing can be written to anyway
    if path == OsStr::new("-") || path.is_empty() {
        Location::Stdio
    } else {
        Location::Path(PathBuf::from(path))
    }
}

/// Splits `png:out.png` into the format and `out.png`.
/// Single-letter prefixes are never formats, so `C:\out.png` is left intact.
/// Non-UTF-8 arguments are always treated as plain paths.
fn split_off_format_prefix(input: &OsStr) -> Option<(FileFormat, OsString)> {
    let string = input.to_str()?;
    let (prefix, rest) = string.split_once(':')?;
    if prefix.len() < 2 {
        return None;
    }
    let format = FileFormat::from_prefix(prefix)?;
    Some((format, OsString::from(rest)))
}
