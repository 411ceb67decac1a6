//! # Hot Reload Module
//!
//! Watches a CORS configuration file and refreshes the origin allow-list
//! when it changes, without rebuilding the rest of the policy.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brrtcors::config::CorsOptions;
//! use brrtcors::cors::Cors;
//! use brrtcors::hot_reload::watch_origins;
//!
//! let cors = Cors::new(&CorsOptions::load("cors.yaml")?);
//! // Keep the watcher alive for as long as reloads should happen
//! let _watcher = watch_origins("cors.yaml", cors.clone())?;
//! ```
//!
//! ## Reload Process
//!
//! 1. **Detection** - Filesystem watcher reports a modify or create event
//! 2. **Parse** - The file is loaded with [`CorsOptions::load`] and the
//!    `BRRTR_CORS_*` environment overrides are applied on top, as at startup
//! 3. **Swap** - `allowed_origins` is published through
//!    [`Cors::refresh_origins`]
//!
//! Methods, headers, credentials and max-age are fixed at construction and
//! are not reloaded.
//!
//! ## Error Handling
//!
//! If the file fails to load, the error is logged and the previous origin
//! list stays active.

use std::path::{Path, PathBuf};

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::config::CorsOptions;
use crate::cors::Cors;

/// Re-read `config_path` and apply its origins to `cors`.
///
/// Returns the number of configured origin entries applied.
pub fn reload_origins(config_path: &Path, cors: &Cors) -> Result<usize, crate::config::ConfigError> {
    let options = CorsOptions::load(config_path)?.apply_env();
    cors.refresh_origins(&options.allowed_origins);
    Ok(options.allowed_origins.len())
}

/// Watch a configuration file and refresh origins whenever it changes.
///
/// The returned watcher must be kept alive; dropping it stops the reloads.
pub fn watch_origins<P>(config_path: P, cors: Cors) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
{
    let path: PathBuf = config_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match reload_origins(&watch_path, &cors) {
                        Ok(count) => info!(
                            path = %watch_path.display(),
                            origins = count,
                            "hot-reload: CORS origins refreshed"
                        ),
                        Err(e) => warn!(
                            path = %watch_path.display(),
                            error = %e,
                            "hot-reload: keeping previous CORS origins"
                        ),
                    }
                }
            }
            Err(e) => warn!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
