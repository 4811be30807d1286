//! Configuration, types, and shared structures for asciireveal.
//!
//! This crate holds the types every other crate of the workspace agrees on:
//! conversion settings, palettes, the character grid, the raw pixel buffer,
//! errors, and the image-loading seam.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod reference;
pub mod traits;

pub use charset::{Palette, PaletteId};
pub use color::CellColor;
pub use config::{AppConfig, ConversionConfig, DisplayConfig};
pub use error::CoreError;
pub use frame::{Cell, FrameBuffer, Grid};
pub use reference::ImageRef;
