use std::fmt::{Debug, Display};
pub struct MaskError(pub String);

impl Display for MaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for MaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MaskError").field(&self.0).finish()
    }
}

impl std::error::Error for MaskError {}

#[macro_export]
macro_rules! am_err {
    ($($arg:tt)*) => {
        $crate::error::MaskError(format!(
            "alphamask: {} @ {}:{}:{}",
            format_args!($($arg)*),
            file!(),
            line!(),
            column!()
        ))
    };
}

#[macro_export]
macro_rules! am_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::am_err!("{}", err));
            }
        }
    };
}
