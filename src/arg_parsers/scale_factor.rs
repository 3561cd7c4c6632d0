use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::numbers::strip_and_parse_number;
use std::{ffi::OsStr, str::FromStr};

/// The multiplier applied to the inverted red channel to produce the new alpha.
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(factor: f64) -> Result<Self, ArgParseErr> {
        if !factor.is_finite() {
            Err(ArgParseErr::with_msg("scale factor must be finite"))
        } else if factor.is_sign_negative() && factor != 0.0 {
            Err(ArgParseErr::with_msg("scale factor cannot be negative"))
        } else {
            // normalizes -0.0
            Ok(Self(factor.abs()))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl FromStr for ScaleFactor {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(OsStr::new(s))
    }
}

impl TryFrom<&OsStr> for ScaleFactor {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        let s = s
            .to_str()
            .ok_or_else(|| ArgParseErr::with_msg("non-utf8 scale factor value"))?;
        let factor = if let Some(percentage) = s.strip_suffix('%') {
            strip_and_parse_number::<f64>(percentage)? / 100.0
        } else {
            strip_and_parse_number::<f64>(s)?
        };
        Self::new(factor)
    }
}


#[cfg(test)]
impl quickcheck::Arbitrary for ScaleFactor {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(crate::utils::arbitrary::non_negative_factor(g))
    }
}
