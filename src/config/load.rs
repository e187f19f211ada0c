use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `STACCATO__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("STACCATO")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.histogram_bins == 0 {
            return Err("ui.histogram_bins must be >= 1".to_string());
        }
        if self.ui.violin_bins == 0 {
            return Err("ui.violin_bins must be >= 1".to_string());
        }
        if self.dataset.extension.trim().trim_start_matches('.').is_empty() {
            return Err("dataset.extension must not be empty".to_string());
        }
        if !self
            .paths
            .files_names
            .iter()
            .any(|name| name == &self.paths.tracks_file)
        {
            return Err(format!(
                "paths.tracks_file '{}' is not listed in paths.files_names",
                self.paths.tracks_file
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `STACCATO_CONFIG_PATH` or the project default.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("STACCATO_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// The default config path `config/staccato.yaml`, relative to the working
/// directory. The config lives next to the data it points at, so no XDG
/// lookup is involved.
pub fn default_config_path() -> Option<PathBuf> {
    Some(PathBuf::from("config").join("staccato.yaml"))
}
