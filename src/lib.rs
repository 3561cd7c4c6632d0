//! `alphamask` turns a vignette into a black overlay whose transparency follows its red channel.
//!
//! The library interface exists for the `alphamask` binary and its tests,
//! and may change at any time.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod arg_parse_err;
pub mod arg_parsers;
pub mod args;
pub mod decode;
pub mod encode;
mod encoders;
pub mod error;
pub mod help;
pub mod image;
pub mod operations;
pub mod plan;
mod utils;
