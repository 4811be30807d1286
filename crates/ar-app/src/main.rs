use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use ar_core::config::AppConfig;
use ar_core::reference::ImageRef;
use ar_core::traits::ImageLoader;
use ar_source::DefaultLoader;
use arc_swap::ArcSwap;
use clap::Parser;

pub mod app;
pub mod cli;
pub mod hotreload;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config + overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    let reference = ImageRef::parse(&cli.image);
    let loader: Arc<dyn ImageLoader> = Arc::new(DefaultLoader::new());

    // Sortie texte one-shot
    if cli.print {
        return print_once(loader.as_ref(), &reference, &config, cli.color);
    }

    let config = Arc::new(ArcSwap::from_pointee(config));

    // 4. Hot-reload config (thread interne notify)
    let _watcher = if cli.config.exists() {
        let overrides = cli.clone();
        Some(hotreload::spawn_config_watcher(
            &cli.config,
            &config,
            move |c| overrides.apply_overrides(c),
        )?)
    } else {
        None
    };

    // 5. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 6. Boucle principale
    let mut app_instance = app::App::new(config, loader, reference);
    let result = app_instance.run(terminal);

    // 7. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

fn resolve_config(cli: &cli::Cli) -> Result<AppConfig> {
    if cli.config.exists() {
        ar_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(AppConfig::default())
    }
}

/// Convert once and write the result to stdout.
fn print_once(
    loader: &dyn ImageLoader,
    reference: &ImageRef,
    config: &AppConfig,
    color: bool,
) -> Result<()> {
    let conversion =
        pipeline::convert_reference(loader, reference, &config.conversion, config.display.probe)?;
    let mut out = io::stdout().lock();
    if color {
        ar_render::ansi::write_ansi(&conversion.grid, &mut out)?;
    } else {
        writeln!(out, "{}", conversion.text)?;
    }
    Ok(())
}
