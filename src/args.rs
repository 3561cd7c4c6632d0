//! Imagemagick-style argument parsing.
//!
//! Options are prefixed by -, not --, and the output filename always comes last,
//! so the parser is hand-rolled rather than built on an argument parsing library.

use std::ffi::{OsStr, OsString};

use crate::{am_err, error::MaskError, plan::ExecutionPlan};

use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    Factor,
    Quality,
    Rounding,
    Strip,
    Verbose,
}

impl Arg {
    pub fn needs_value(&self) -> bool {
        match self {
            Arg::Factor => true,
            Arg::Quality => true,
            Arg::Rounding => true,
            Arg::Strip => false,
            Arg::Verbose => false,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Factor => "scale factor applied to the inverted red channel, e.g. 0.9 or 90%",
            Arg::Quality => "PNG compression level and filter",
            Arg::Rounding => "nearest (default) or truncate",
            Arg::Strip => "strip the color profile from the output",
            Arg::Verbose => "print a summary of each processed image to stderr",
        }
    }
}

pub fn parse_args(mut args: Vec<OsString>) -> Result<ExecutionPlan, MaskError> {
    // maybe_print_help should take care of it, but this won't hurt
    if args.len() <= 1 {
        return Err(am_err!("No command-line arguments provided"));
    }

    // the output filename is always the last argument
    let output_filename = args.pop().unwrap_or_default();
    if starts_with_sign(&output_filename) {
        return Err(am_err!(
            "missing an image filename `{}'",
            output_filename.to_string_lossy()
        ));
    }

    let mut plan = ExecutionPlan::default();
    plan.set_output_file(&output_filename);

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if starts_with_sign(&raw_arg) {
            // A file named "-foobar.png" will be parsed as an option.
            let (_sign, string_arg) = sign_and_arg_name(raw_arg)?;
            let arg = Arg::try_from(string_arg.as_str())
                .map_err(|_| am_err!("unrecognized option `-{}'", string_arg))?;
            if arg.needs_value() {
                let value = iter.next();
                plan.apply_arg(arg, value.as_deref())?;
            } else {
                plan.apply_arg(arg, None)?;
            }
        } else {
            plan.add_input_file(&raw_arg);
        }
    }
    if plan.input_files().is_empty() {
        return Err(am_err!("no images defined"));
    }
    Ok(plan)
}

/// Checks if the string starts with a `-` or a `+`.
/// A lone `-` is the standard stream, not an option.
fn starts_with_sign(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    let first_byte = bytes.first();
    bytes.len() > 1
        && (first_byte == Some(&b'-') || first_byte == Some(&b'+'))
        // Anything starting with two dashes instead of one is treated as filename
        && bytes.get(1) != Some(&b'-')
}

/// Splits the string into a sign (- or +) and argument name
fn sign_and_arg_name(raw_arg: OsString) -> Result<(u8, String), MaskError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| am_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    let sign = string.remove(0);
    Ok((sign as u8, string))
}
