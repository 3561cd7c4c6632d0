use std::{ffi::OsStr, str::FromStr};

use crate::arg_parse_err::ArgParseErr;

/// Strips leading and trailing whitespace from an input string slice
/// and attempts to parse the remaining string into a specified numeric type `T`.
pub fn strip_and_parse_number<T>(input: &str) -> Result<T, T::Err>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    let trimmed_str = input.trim();
    trimmed_str.parse::<T>()
}

/// Parses a numeric option value such as the one passed to `-quality`.
pub fn parse_numeric_arg<T>(input: &OsStr) -> Result<T, ArgParseErr>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    let string = input.to_str().ok_or_else(ArgParseErr::new)?;
    strip_and_parse_number(string).map_err(|_| ArgParseErr::new())
}
