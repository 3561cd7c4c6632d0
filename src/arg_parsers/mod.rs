//! Parsers for the values of specific command-line arguments

mod filename;
pub use filename::*;
mod rounding;
pub use rounding::*;
mod scale_factor;
pub use scale_factor::*;
pub mod numbers;
pub use numbers::parse_numeric_arg;
