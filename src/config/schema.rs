use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `staccato.yaml`.
///
/// File format: YAML
/// Default path: `config/staccato.yaml`, relative to the working directory
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `STACCATO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathsSettings,
    pub dataset: DatasetSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathsSettings::default(),
            dataset: DatasetSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSettings {
    /// Directory holding the dataset files.
    pub data_dir: PathBuf,

    /// Dataset files expected under `data_dir`.
    pub files_names: Vec<String>,

    /// Which of `files_names` holds the track table.
    pub tracks_file: String,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files_names: vec!["tracks.csv".to_string()],
            tracks_file: "tracks.csv".to_string(),
        }
    }
}

impl PathsSettings {
    /// Full path of the track table.
    pub fn tracks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tracks_file)
    }

    /// Full paths of every configured dataset file.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.files_names
            .iter()
            .map(|name| self.data_dir.join(name))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Field delimiter used by the dataset files.
    ///
    /// The tracks table ships `~`-separated; `~` must be quoted in YAML.
    pub delimiter: char,

    /// File extension used when listing candidate dataset files
    /// (case-insensitive, with or without dot).
    pub extension: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            delimiter: '~',
            extension: "csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "staccato" header box.
    pub header_text: String,

    /// Number of equal-width bins for the popularity histogram.
    pub histogram_bins: usize,

    /// Number of bins behind the violin density profiles.
    pub violin_bins: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Tracks analysis, one keypress at a time ~ ".to_string(),
            histogram_bins: 10,
            violin_bins: 24,
        }
    }
}
