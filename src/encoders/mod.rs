//! Format-specific encoders, for formats where we need more control than `image` gives by default

#[cfg(feature = "png")]
pub mod png;
