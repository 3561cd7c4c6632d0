use std::ffi::OsStr;

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::{parse_numeric_arg, FileArg, Location, Rounding, ScaleFactor};
use crate::args::Arg;
use crate::decode::decode;
use crate::operations::alpha_from_red;
use crate::utils::filename::numbered_path;
use crate::{am_err, encode, error::MaskError};

/// Plan of operations for the whole run over multiple files
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    output_file: FileArg,
    input_files: Vec<FileArg>,
    settings: MaskSettings,
    modifiers: Modifiers,
    verbose: bool,
}

impl ExecutionPlan {
    pub fn apply_arg(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), MaskError> {
        let arg_string: &'static str = arg.into();
        if arg.needs_value() != value.is_some() {
            return Err(am_err!("argument requires a value: {arg_string}"));
        };

        self.apply_arg_inner(arg, value).map_err(|arg_err| {
            am_err!(
                "{}",
                arg_err.display_with_arg(arg_string, value.unwrap_or_default())
            )
        })?;

        Ok(())
    }

    /// Currently this can only fail due to argument parsing.
    /// Split into its own function due to lack of try{} blocks on stable Rust.
    fn apply_arg_inner(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), ArgParseErr> {
        let value = value.unwrap_or_default();
        match arg {
            Arg::Factor => self.settings.factor = ScaleFactor::try_from(value)?,
            Arg::Quality => self.modifiers.quality = Some(parse_numeric_arg(value)?),
            Arg::Rounding => self.settings.rounding = Rounding::try_from(value)?,
            Arg::Strip => self.modifiers.strip = true,
            Arg::Verbose => self.verbose = true,
        };

        Ok(())
    }

    pub fn add_input_file(&mut self, file: &OsStr) {
        self.input_files.push(FileArg::parse(file));
    }

    pub fn set_output_file(&mut self, file: &OsStr) {
        self.output_file = FileArg::parse(file);
    }

    pub fn input_files(&self) -> &[FileArg] {
        &self.input_files
    }

    pub fn output_file(&self) -> &FileArg {
        &self.output_file
    }

    pub fn settings(&self) -> MaskSettings {
        self.settings
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn execute(&self) -> Result<(), MaskError> {
        if self.input_files.is_empty() {
            return Err(am_err!("no images defined"));
        }
        for (input, output) in self.input_files.iter().zip(self.output_locations()) {
            let mut image = decode(&input.location, input.format)?;

            alpha_from_red(&mut image, self.settings.factor, self.settings.rounding)?;

            encode::encode(
                &mut image,
                &output,
                self.output_file.format,
                &self.modifiers,
            )?;

            if self.verbose {
                let format = image
                    .format
                    .map(|f| f.extensions_str()[0].to_uppercase())
                    .unwrap_or_default();
                eprintln!(
                    "{} {format} {}x{} => {} (factor {}, {:?})",
                    input.location.display(),
                    image.pixels.width(),
                    image.pixels.height(),
                    output.display(),
                    self.settings.factor.get(),
                    self.settings.rounding,
                );
            }
        }

        Ok(())
    }

    fn output_locations(&self) -> Vec<Location> {
        if self.input_files.len() > 1 {
            if let Location::Path(output_file) = &self.output_file.location {
                // indexing for output images starts at 1
                return (1..=self.input_files.len())
                    .map(|i| Location::Path(numbered_path(output_file, i)))
                    .collect();
            }
        }
        vec![self.output_file.location.clone(); self.input_files.len()]
    }
}

/// Parameters of the alpha-from-red transform
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MaskSettings {
    pub factor: ScaleFactor,
    pub rounding: Rounding,
}

/// Settings that affect how the result is written out
#[derive(Debug, Default)]
pub struct Modifiers {
    pub quality: Option<f64>,
    /// Drop the ICC profile
    pub strip: bool,
}
