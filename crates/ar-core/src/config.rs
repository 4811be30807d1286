use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::PaletteId;
use crate::error::CoreError;

/// Paramètres d'une conversion image → grille.
///
/// Immutable per conversion: changing any field means converting again,
/// never patching an existing grid.
///
/// # Example
/// ```
/// use ar_core::config::ConversionConfig;
/// let config = ConversionConfig::default();
/// assert!((config.resolution - 0.15).abs() < f64::EPSILON);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Palette built-in utilisée pour le mapping luminance → caractère.
    pub palette: PaletteId,
    /// Fraction of the source resolution kept, in (0, 1].
    pub resolution: f64,
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,
    /// Luma standard + couleur neutre au lieu du modèle couleur.
    pub grayscale: bool,
    /// Horizontal stretch factor (> 0).
    pub aspect_x: f64,
    /// Vertical stretch factor (> 0).
    pub aspect_y: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            palette: PaletteId::Standard,
            resolution: 0.15,
            invert: false,
            grayscale: false,
            aspect_x: 1.0,
            aspect_y: 0.8,
        }
    }
}

impl ConversionConfig {
    /// Check every field against its domain.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] naming the first offending field.
    ///
    /// # Example
    /// ```
    /// use ar_core::config::ConversionConfig;
    /// let config = ConversionConfig { resolution: 0.0, ..Default::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0 && self.resolution <= 1.0) {
            return Err(CoreError::Config(format!(
                "resolution must lie in (0, 1], got {}",
                self.resolution
            )));
        }
        for (name, value) in [("aspect_x", self.aspect_x), ("aspect_y", self.aspect_y)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp numeric fields into ranges the converter accepts.
    pub fn clamp_all(&mut self) {
        self.resolution = clamp_or(self.resolution, 0.001, 1.0, 0.15);
        self.aspect_x = clamp_or(self.aspect_x, 0.1, 10.0, 1.0);
        self.aspect_y = clamp_or(self.aspect_y, 0.1, 10.0, 0.8);
    }
}

/// Clamp, replacing NaN by `fallback`.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Paramètres d'affichage du terminal.
///
/// # Example
/// ```
/// use ar_core::config::DisplayConfig;
/// let display = DisplayConfig::default();
/// assert_eq!(display.target_fps, 60);
/// assert!(display.probe);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// FPS cible de la boucle de rendu.
    pub target_fps: u32,
    /// Disable the per-row fade-in and the settled oscillation.
    pub reduce_motion: bool,
    /// Probe the reference for existence before loading it.
    pub probe: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            reduce_motion: false,
            probe: true,
        }
    }
}

/// Configuration complète, hot-rechargeable.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Conversion settings.
    pub conversion: ConversionConfig,
    /// Terminal display settings.
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.conversion.clamp_all();
        self.display.target_fps = self.display.target_fps.clamp(15, 120);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    conversion: Option<ConversionSection>,
    display: Option<DisplaySection>,
}

/// Conversion section, all fields optional for partial override.
#[derive(Deserialize)]
struct ConversionSection {
    palette: Option<String>,
    resolution: Option<f64>,
    invert: Option<bool>,
    grayscale: Option<bool>,
    aspect_x: Option<f64>,
    aspect_y: Option<f64>,
}

/// Display section, all fields optional.
#[derive(Deserialize)]
struct DisplaySection {
    target_fps: Option<u32>,
    reduce_motion: Option<bool>,
    probe: Option<bool>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema or names an
/// unknown palette.
///
/// # Example
/// ```
/// use ar_core::config::parse_config;
/// let config = parse_config("[conversion]\npalette = \"blocks\"\n").unwrap();
/// assert_eq!(config.conversion.palette.name(), "blocks");
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(c) = file.conversion {
        if let Some(name) = c.palette {
            config.conversion.palette = PaletteId::from_name(&name)
                .with_context(|| format!("Palette inconnue : {name}"))?;
        }
        if let Some(v) = c.resolution {
            config.conversion.resolution = v;
        }
        if let Some(v) = c.invert {
            config.conversion.invert = v;
        }
        if let Some(v) = c.grayscale {
            config.conversion.grayscale = v;
        }
        if let Some(v) = c.aspect_x {
            config.conversion.aspect_x = v;
        }
        if let Some(v) = c.aspect_y {
            config.conversion.aspect_y = v;
        }
    }

    if let Some(d) = file.display {
        if let Some(v) = d.target_fps {
            config.display.target_fps = v;
        }
        if let Some(v) = d.reduce_motion {
            config.display.reduce_motion = v;
        }
        if let Some(v) = d.probe {
            config.display.probe = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ar_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Config invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let config = parse_config(
            "[conversion]\nresolution = 0.3\ngrayscale = true\n[display]\nreduce_motion = true\n",
        )
        .unwrap();
        assert!((config.conversion.resolution - 0.3).abs() < f64::EPSILON);
        assert!(config.conversion.grayscale);
        assert!(!config.conversion.invert);
        assert!(config.display.reduce_motion);
        assert_eq!(config.display.target_fps, 60);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config(
            "[conversion]\nresolution = 4.0\naspect_y = -1.0\n[display]\ntarget_fps = 1000\n",
        )
        .unwrap();
        assert!((config.conversion.resolution - 1.0).abs() < f64::EPSILON);
        assert!((config.conversion.aspect_y - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.display.target_fps, 120);
        assert!(config.conversion.validate().is_ok());
    }

    #[test]
    fn unknown_palette_is_rejected() {
        assert!(parse_config("[conversion]\npalette = \"braille\"\n").is_err());
    }

    #[test]
    fn validate_rejects_bad_aspect() {
        let config = ConversionConfig {
            aspect_x: f64::NAN,
            ..ConversionConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversion]\npalette = \"minimal\"\ninvert = true").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.conversion.palette, PaletteId::Minimal);
        assert!(config.conversion.invert);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
