use crate::error::CoreError;
use crate::frame::FrameBuffer;
use crate::reference::ImageRef;

/// Capacité de chargement d'image consommée par le convertisseur.
///
/// Implémenté par : `DefaultLoader` (fichiers locaux + URLs).
///
/// # Example
/// ```
/// use ar_core::traits::ImageLoader;
/// use ar_core::{CoreError, FrameBuffer, ImageRef};
///
/// struct SolidLoader;
/// impl ImageLoader for SolidLoader {
///     fn load(&self, _reference: &ImageRef) -> Result<FrameBuffer, CoreError> {
///         Ok(FrameBuffer::new(4, 4))
///     }
/// }
///
/// let frame = SolidLoader.load(&ImageRef::parse("any.png")).unwrap();
/// assert_eq!(frame.width, 4);
/// assert!(SolidLoader.probe(&ImageRef::parse("any.png")).is_ok());
/// ```
pub trait ImageLoader: Send + Sync + 'static {
    /// Cheap existence check before loading.
    ///
    /// Failures are advisory only: callers log them and load anyway, since a
    /// reachable image can still look inaccessible to a bare probe.
    ///
    /// # Errors
    /// Returns a description of why the reference looks unreachable.
    fn probe(&self, _reference: &ImageRef) -> anyhow::Result<()> {
        Ok(())
    }

    /// Load and rasterize the image at native resolution.
    ///
    /// CONTRAT : le buffer retourné a `width > 0` et `height > 0`.
    ///
    /// # Errors
    /// [`CoreError::ImageLoad`] if the reference cannot be fetched or decoded
    /// or has zero dimensions, [`CoreError::RenderContext`] if no pixel surface
    /// can be allocated for it.
    fn load(&self, reference: &ImageRef) -> Result<FrameBuffer, CoreError>;
}
