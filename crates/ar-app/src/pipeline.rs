use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use ar_ascii::{Conversion, convert};
use ar_core::config::ConversionConfig;
use ar_core::error::CoreError;
use ar_core::reference::ImageRef;
use ar_core::traits::ImageLoader;

/// Result of one conversion request, tagged with the request's generation.
#[derive(Debug)]
pub struct ConversionEvent {
    /// Generation of the request that produced this outcome.
    pub generation: u64,
    /// Finished grid and text, or the reason there is none.
    pub outcome: Result<Conversion, CoreError>,
}

/// Load `reference` and convert it. Synchronous.
///
/// A failed probe is logged and the load is attempted anyway.
///
/// # Errors
/// Returns the load or conversion error; no partial result is produced.
pub fn convert_reference(
    loader: &dyn ImageLoader,
    reference: &ImageRef,
    config: &ConversionConfig,
    probe: bool,
) -> Result<Conversion, CoreError> {
    if probe && let Err(e) = loader.probe(reference) {
        log::warn!("Sonde échouée pour {reference} : {e:#}");
    }
    let frame = loader.load(reference)?;
    let conversion = convert(&frame, config)?;
    log::info!(
        "Conversion {} → {}x{} ({})",
        reference,
        conversion.grid.width(),
        conversion.grid.height(),
        config.palette
    );
    Ok(conversion)
}

/// Run [`convert_reference`] on a detached `converter` thread.
///
/// Exactly one [`ConversionEvent`] is sent on `tx` when the thread finishes.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_conversion(
    loader: Arc<dyn ImageLoader>,
    reference: ImageRef,
    config: ConversionConfig,
    probe: bool,
    generation: u64,
    tx: flume::Sender<ConversionEvent>,
) -> Result<()> {
    thread::Builder::new()
        .name("converter".into())
        .spawn(move || {
            let outcome = convert_reference(loader.as_ref(), &reference, &config, probe);
            if tx.send(ConversionEvent { generation, outcome }).is_err() {
                log::debug!("Conversion #{generation} terminée après fermeture de l'app");
            }
        })
        .context("Impossible de lancer le thread de conversion")?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use ar_core::frame::FrameBuffer;

    use super::*;

    /// Uniform gray image, or a load failure for every reference.
    pub(crate) struct StubLoader {
        pub gray: Option<u8>,
        pub probes: AtomicUsize,
    }

    impl StubLoader {
        pub(crate) fn gray(level: u8) -> Self {
            Self {
                gray: Some(level),
                probes: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                gray: None,
                probes: AtomicUsize::new(0),
            }
        }
    }

    impl ImageLoader for StubLoader {
        fn probe(&self, _reference: &ImageRef) -> anyhow::Result<()> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("HEAD refusé")
        }

        fn load(&self, reference: &ImageRef) -> Result<FrameBuffer, CoreError> {
            let Some(level) = self.gray else {
                return Err(CoreError::ImageLoad {
                    reference: reference.to_string(),
                    reason: "introuvable".into(),
                });
            };
            let mut frame = FrameBuffer::new(100, 100);
            for y in 0..100 {
                for x in 0..100 {
                    frame.set_pixel(x, y, [level, level, level, 255]);
                }
            }
            Ok(frame)
        }
    }

    fn square_gray_config() -> ConversionConfig {
        ConversionConfig {
            resolution: 0.1,
            grayscale: true,
            aspect_x: 1.0,
            aspect_y: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn failed_probe_still_loads() {
        let loader = StubLoader::gray(128);
        let reference = ImageRef::parse("gray.png");
        let conversion =
            convert_reference(&loader, &reference, &square_gray_config(), true).unwrap();
        assert_eq!(loader.probes.load(Ordering::SeqCst), 1);
        assert_eq!(conversion.grid.width(), 10);
        assert_eq!(conversion.grid.height(), 5);
    }

    #[test]
    fn probe_can_be_skipped() {
        let loader = StubLoader::gray(128);
        let reference = ImageRef::parse("gray.png");
        convert_reference(&loader, &reference, &square_gray_config(), false).unwrap();
        assert_eq!(loader.probes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn load_failure_is_reported() {
        let loader = StubLoader::failing();
        let reference = ImageRef::parse("https://host/missing.png");
        let err = convert_reference(&loader, &reference, &square_gray_config(), true).unwrap_err();
        assert!(matches!(err, CoreError::ImageLoad { .. }));
    }

    #[test]
    fn worker_sends_one_tagged_event() {
        let (tx, rx) = flume::unbounded();
        spawn_conversion(
            Arc::new(StubLoader::gray(200)),
            ImageRef::parse("gray.png"),
            square_gray_config(),
            false,
            7,
            tx,
        )
        .unwrap();
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.generation, 7);
        assert!(event.outcome.is_ok());
        // sender dropped with the thread
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
