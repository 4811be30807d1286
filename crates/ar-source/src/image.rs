use std::path::Path;

use ::image::{DynamicImage, GenericImageView};
use anyhow::bail;
use ar_core::error::CoreError;
use ar_core::frame::FrameBuffer;
use ar_core::reference::ImageRef;
use ar_core::traits::ImageLoader;

/// Chargeur par défaut : fichiers locaux via `image`, URLs via `reqwest`.
///
/// # Example
/// ```no_run
/// use ar_core::traits::ImageLoader;
/// use ar_core::ImageRef;
/// use ar_source::DefaultLoader;
///
/// let frame = DefaultLoader::new().load(&ImageRef::parse("test.jpg")).unwrap();
/// assert!(frame.width > 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultLoader;

impl DefaultLoader {
    /// Create a loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for DefaultLoader {
    fn probe(&self, reference: &ImageRef) -> anyhow::Result<()> {
        match reference {
            ImageRef::Path(path) => probe_path(path),
            #[cfg(feature = "remote")]
            ImageRef::Url(url) => crate::remote::probe(url),
            #[cfg(not(feature = "remote"))]
            ImageRef::Url(url) => bail!("cannot probe {url}: built without the `remote` feature"),
        }
    }

    fn load(&self, reference: &ImageRef) -> Result<FrameBuffer, CoreError> {
        let img = match reference {
            ImageRef::Path(path) => {
                ::image::open(path).map_err(|e| load_error(reference, &e))?
            }
            #[cfg(feature = "remote")]
            ImageRef::Url(url) => {
                let bytes = crate::remote::fetch(url)?;
                decode_bytes(&bytes, reference)?
            }
            #[cfg(not(feature = "remote"))]
            ImageRef::Url(_) => {
                return Err(load_error(
                    reference,
                    &"remote images require the `remote` feature",
                ));
            }
        };
        log::info!(
            "Image chargée : {reference} ({}×{})",
            img.width(),
            img.height()
        );
        rasterize(&img, reference)
    }
}

fn probe_path(path: &Path) -> anyhow::Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        bail!("{} introuvable ou n'est pas un fichier", path.display())
    }
}

/// Build a [`CoreError::ImageLoad`] for `reference`.
pub(crate) fn load_error(reference: &ImageRef, reason: &dyn std::fmt::Display) -> CoreError {
    CoreError::ImageLoad {
        reference: reference.to_string(),
        reason: reason.to_string(),
    }
}

/// Decode an encoded image (PNG, JPEG, ...) held in memory.
///
/// # Errors
/// Returns [`CoreError::ImageLoad`] if the bytes are not a supported image.
pub fn decode_bytes(bytes: &[u8], reference: &ImageRef) -> Result<DynamicImage, CoreError> {
    ::image::load_from_memory(bytes).map_err(|e| load_error(reference, &e))
}

/// Dessine l'image dans une surface RGBA hors-écran, à sa résolution native.
///
/// # Errors
/// [`CoreError::ImageLoad`] for zero-sized images, [`CoreError::RenderContext`]
/// if the surface cannot be allocated.
///
/// # Example
/// ```
/// use ar_core::ImageRef;
/// use ar_source::image::rasterize;
/// let img = image::DynamicImage::new_rgb8(3, 2);
/// let frame = rasterize(&img, &ImageRef::parse("mem.png")).unwrap();
/// assert_eq!((frame.width, frame.height), (3, 2));
/// assert_eq!(frame.pixel(2, 1), Some((0, 0, 0, 255)));
/// ```
pub fn rasterize(img: &DynamicImage, reference: &ImageRef) -> Result<FrameBuffer, CoreError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(load_error(
            reference,
            &format!("Invalid image dimensions: {width}x{height}"),
        ));
    }

    let mut surface = FrameBuffer::try_new(width, height)?;
    if let DynamicImage::ImageRgba8(buf) = img {
        surface.data.copy_from_slice(buf.as_raw());
    } else {
        for (x, y, px) in img.pixels() {
            surface.set_pixel(x, y, px.0);
        }
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ::image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn rasterize_keeps_native_pixels() {
        let mut img = RgbaImage::new(4, 3);
        img.put_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let reference = ImageRef::parse("mem.png");
        let frame = rasterize(&DynamicImage::ImageRgba8(img), &reference).unwrap();
        assert_eq!(frame.data.len(), 4 * 3 * 4);
        assert_eq!(frame.pixel(3, 2), Some((10, 20, 30, 255)));
    }

    #[test]
    fn rasterize_rejects_zero_dimensions() {
        let reference = ImageRef::parse("empty.png");
        let err = rasterize(&DynamicImage::new_rgba8(0, 5), &reference).unwrap_err();
        assert!(matches!(err, CoreError::ImageLoad { .. }));
        assert!(err.to_string().contains("0x5"));
    }

    #[test]
    fn decode_rejects_garbage() {
        let reference = ImageRef::parse("garbage.png");
        assert!(matches!(
            decode_bytes(b"definitely not a png", &reference),
            Err(CoreError::ImageLoad { .. })
        ));
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img = RgbaImage::from_pixel(5, 4, Rgba([128, 128, 128, 255]));
        std::fs::write(&path, png_bytes(&img)).unwrap();

        let reference = ImageRef::Path(path);
        let loader = DefaultLoader::new();
        assert!(loader.probe(&reference).is_ok());
        let frame = loader.load(&reference).unwrap();
        assert_eq!((frame.width, frame.height), (5, 4));
        assert_eq!(frame.pixel(0, 0), Some((128, 128, 128, 255)));
    }

    #[test]
    fn missing_file_fails_probe_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let reference = ImageRef::Path(dir.path().join("absent.jpg"));
        let loader = DefaultLoader::new();
        assert!(loader.probe(&reference).is_err());
        assert!(matches!(
            loader.load(&reference),
            Err(CoreError::ImageLoad { .. })
        ));
    }
}
