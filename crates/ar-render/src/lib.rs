//! Terminal presentation for asciireveal.
//!
//! Reveal scheduling, per-row motion, the ratatui grid canvas and UI frame,
//! and plain ANSI output for non-interactive use.

pub mod ansi;
pub mod canvas;
pub mod motion;
pub mod reveal;
pub mod ui;

pub use reveal::{RevealEngine, RevealPhase, RowPresentation, TickRequest};
