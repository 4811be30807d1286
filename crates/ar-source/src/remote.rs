use anyhow::{Context, Result, bail};
use ar_core::error::CoreError;
use ar_core::reference::ImageRef;
use reqwest::blocking::Client;

// Pas de timeout : un chargement bloqué laisse simplement la vue vide.
fn client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("asciireveal/", env!("CARGO_PKG_VERSION")))
        .timeout(None::<std::time::Duration>)
        .build()
}

/// `HEAD` request against `url`.
///
/// # Errors
/// Returns an error if the request fails or the server answers with a
/// non-success status.
pub fn probe(url: &str) -> Result<()> {
    let response = client()?
        .head(url)
        .send()
        .with_context(|| format!("HEAD {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("HEAD {url} returned status {status}");
    }
    Ok(())
}

/// Download the encoded image bytes at `url`.
///
/// # Errors
/// Returns [`CoreError::ImageLoad`] on transport errors or non-success status.
pub fn fetch(url: &str) -> Result<Vec<u8>, CoreError> {
    let reference = ImageRef::Url(url.to_string());
    let fail = |e: &dyn std::fmt::Display| crate::image::load_error(&reference, e);

    let response = client()
        .and_then(|c| c.get(url).send())
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| fail(&e))?;
    let bytes = response.bytes().map_err(|e| fail(&e))?;
    log::debug!("{} octets reçus depuis {url}", bytes.len());
    Ok(bytes.to_vec())
}
