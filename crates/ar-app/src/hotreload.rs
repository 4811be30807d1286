use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ar_core::config::AppConfig;
use arc_swap::ArcSwap;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Lance un watcher qui recharge le fichier config dans l'ArcSwap.
///
/// `overrides` is re-applied on every reload so command-line values keep
/// winning over the file. Retourne le Watcher (doit rester vivant tant que
/// l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher<F>(
    config_path: &Path,
    config: &Arc<ArcSwap<AppConfig>>,
    overrides: F,
) -> Result<RecommendedWatcher>
where
    F: Fn(&mut AppConfig) + Send + 'static,
{
    let config = Arc::clone(config);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        {
            reload_into(&path, &config, &overrides);
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Re-read `path` and publish it. On error the previous config is kept.
///
/// Returns `true` when a new config was stored.
pub fn reload_into<F>(path: &Path, config: &ArcSwap<AppConfig>, overrides: &F) -> bool
where
    F: Fn(&mut AppConfig),
{
    match ar_core::config::load_config(path) {
        Ok(mut new_config) => {
            overrides(&mut new_config);
            config.store(Arc::new(new_config));
            log::info!("Config rechargée depuis {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("Erreur de rechargement config : {e:#}");
            false
        }
    }
}
