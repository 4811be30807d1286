use thiserror::Error;

/// Errors raised while turning an image reference into a character grid.
///
/// Every variant is recoverable: the caller drops any stale grid, reports the
/// message, and may retry with a new reference or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The image could not be fetched or decoded, or reported zero dimensions.
    #[error("Failed to load image {reference}: {reason}")]
    ImageLoad {
        /// Reference that was being loaded.
        reference: String,
        /// Human-readable cause.
        reason: String,
    },

    /// No off-screen pixel surface could be acquired for the image.
    #[error("Impossible d'allouer une surface {width}×{height} : {reason}")]
    RenderContext {
        /// Width of the requested surface.
        width: u32,
        /// Height of the requested surface.
        height: u32,
        /// Human-readable cause.
        reason: String,
    },

    /// The pixel surface exists but its contents cannot be read back.
    #[error("Failed to read pixel data: {0}")]
    PixelRead(String),

    /// Resolution and aspect factors floor the target grid to nothing.
    #[error("Configuration dégénérée : grille cible {columns}×{rows}")]
    DegenerateConfiguration {
        /// Target column count.
        columns: u32,
        /// Target row count.
        rows: u32,
    },

    /// A configuration value lies outside its domain.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
