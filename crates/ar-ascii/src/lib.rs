//! Conversion engine for asciireveal.
//!
//! Samples pixel buffers into colored character grids.

pub mod color_map;
pub mod converter;
pub mod luminance;

pub use converter::{Conversion, SamplingPlan, convert};
