use std::path::PathBuf;

use ar_core::charset::PaletteId;
use ar_core::config::AppConfig;
use clap::Parser;

/// asciireveal — image to colored ASCII art, revealed row by row.
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à convertir : chemin local ou URL http(s).
    pub image: String,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Palette : standard, detailed, blocks, minimal.
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Fraction of the source resolution kept, in (0, 1].
    #[arg(short, long)]
    pub resolution: Option<f64>,

    /// Inverser la luminance.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Luma standard et caractères blancs.
    #[arg(long, default_value_t = false)]
    pub grayscale: bool,

    /// Horizontal stretch factor.
    #[arg(long)]
    pub aspect_x: Option<f64>,

    /// Vertical stretch factor.
    #[arg(long)]
    pub aspect_y: Option<f64>,

    /// FPS cible.
    #[arg(long)]
    pub fps: Option<u32>,

    /// No fade-in, no oscillation.
    #[arg(long, default_value_t = false)]
    pub reduce_motion: bool,

    /// Skip the existence probe before loading.
    #[arg(long, default_value_t = false)]
    pub no_probe: bool,

    /// Convertir une fois et écrire le texte sur stdout (pas de TUI).
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// With --print: truecolor ANSI escapes per cell.
    #[arg(long, default_value_t = false, requires = "print")]
    pub color: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a file or default config.
    ///
    /// Flags only ever switch a setting on; options replace the value. The
    /// result is clamped like a freshly parsed file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref name) = self.palette {
            match PaletteId::from_name(name) {
                Some(id) => config.conversion.palette = id,
                None => log::warn!("Palette inconnue '{name}', utilisation de la config."),
            }
        }
        if let Some(v) = self.resolution {
            config.conversion.resolution = v;
        }
        if self.invert {
            config.conversion.invert = true;
        }
        if self.grayscale {
            config.conversion.grayscale = true;
        }
        if let Some(v) = self.aspect_x {
            config.conversion.aspect_x = v;
        }
        if let Some(v) = self.aspect_y {
            config.conversion.aspect_y = v;
        }
        if let Some(fps) = self.fps {
            config.display.target_fps = fps;
        }
        if self.reduce_motion {
            config.display.reduce_motion = true;
        }
        if self.no_probe {
            config.display.probe = false;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "asciireveal",
            "cat.png",
            "--palette",
            "Blocks",
            "--resolution",
            "0.5",
            "--grayscale",
            "--no-probe",
            "--fps",
            "500",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.image, "cat.png");
        assert_eq!(config.conversion.palette, PaletteId::Blocks);
        assert!((config.conversion.resolution - 0.5).abs() < f64::EPSILON);
        assert!(config.conversion.grayscale);
        assert!(!config.conversion.invert);
        assert!(!config.display.probe);
        assert_eq!(config.display.target_fps, 120);
    }

    #[test]
    fn unknown_palette_keeps_config() {
        let cli = Cli::try_parse_from(["asciireveal", "a.png", "-p", "neon"]).unwrap();
        let mut config = AppConfig::default();
        config.conversion.palette = PaletteId::Minimal;
        cli.apply_overrides(&mut config);
        assert_eq!(config.conversion.palette, PaletteId::Minimal);
    }

    #[test]
    fn color_requires_print() {
        assert!(Cli::try_parse_from(["asciireveal", "a.png", "--color"]).is_err());
        assert!(Cli::try_parse_from(["asciireveal", "a.png", "--print", "--color"]).is_ok());
    }

    #[test]
    fn image_is_required() {
        assert!(Cli::try_parse_from(["asciireveal"]).is_err());
    }
}
