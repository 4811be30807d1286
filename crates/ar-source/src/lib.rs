//! Image acquisition for asciireveal: probing, decoding, rasterization.

pub mod image;
#[cfg(feature = "remote")]
pub mod remote;

pub use crate::image::DefaultLoader;
