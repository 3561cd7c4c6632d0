use crate::arg_parse_err::ArgParseErr;
use std::{ffi::OsStr, str::FromStr};

/// How the scaled alpha value is turned into an integer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round half away from zero, so 77.5 becomes 78.
    #[default]
    Nearest,
    /// Drop the fractional part, so 77.5 becomes 77.
    Truncate,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Nearest => value.round(),
            Rounding::Truncate => value.trunc(),
        }
    }
}

impl FromStr for Rounding {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(OsStr::new(s))
    }
}

impl TryFrom<&OsStr> for Rounding {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        let string: &str = s
            .to_str()
            .ok_or_else(|| ArgParseErr::with_msg("invalid rounding method"))?;
        match string.to_ascii_lowercase().as_str() {
            "nearest" | "round" => Ok(Rounding::Nearest),
            "truncate" | "floor" => Ok(Rounding::Truncate),
            _ => Err(ArgParseErr::with_msg("unknown rounding method")),
        }
    }
}
