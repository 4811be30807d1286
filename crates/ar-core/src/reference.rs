use std::fmt;
use std::path::PathBuf;

/// Where an image comes from: a local path or an absolute http(s) URL.
///
/// # Example
/// ```
/// use ar_core::reference::ImageRef;
/// assert!(ImageRef::parse("https://example.com/cat.png").is_remote());
/// assert!(!ImageRef::parse("assets/cat.png").is_remote());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageRef {
    /// File on the local filesystem.
    Path(PathBuf),
    /// Absolute `http://` or `https://` URL.
    Url(String),
}

impl ImageRef {
    /// Classify a user-supplied reference.
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let lower = reference.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageRef::Url(reference.trim().to_string())
        } else {
            ImageRef::Path(PathBuf::from(reference))
        }
    }

    /// `true` for URLs.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, ImageRef::Url(_))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Path(path) => write!(f, "{}", path.display()),
            ImageRef::Url(url) => f.write_str(url),
        }
    }
}
