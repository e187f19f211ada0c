use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_staccato_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("STACCATO_CONFIG_PATH", "/tmp/staccato-test-config.yaml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/staccato-test-config.yaml")
    );
}

#[test]
fn default_config_path_is_project_relative() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("STACCATO_CONFIG_PATH");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("config").join("staccato.yaml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("staccato.yaml");
    std::fs::write(
        &cfg_path,
        r#"
paths:
  data_dir: datasets
  files_names:
    - tracks.csv
    - albums.csv
  tracks_file: tracks.csv

dataset:
  delimiter: ";"
  extension: tsv

ui:
  header_text: "hello"
  histogram_bins: 20
  violin_bins: 12
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("STACCATO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("STACCATO__UI__HISTOGRAM_BINS");

    let s = Settings::load().unwrap();
    assert_eq!(s.paths.data_dir, std::path::PathBuf::from("datasets"));
    assert_eq!(
        s.paths.files_names,
        vec!["tracks.csv".to_string(), "albums.csv".to_string()]
    );
    assert_eq!(s.paths.tracks_file, "tracks.csv");
    assert_eq!(
        s.paths.tracks_path(),
        std::path::PathBuf::from("datasets").join("tracks.csv")
    );
    assert_eq!(s.paths.file_paths().len(), 2);
    assert_eq!(s.dataset.delimiter, ';');
    assert_eq!(s.dataset.extension, "tsv");
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.histogram_bins, 20);
    assert_eq!(s.ui.violin_bins, 12);
}

#[test]
fn settings_missing_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("STACCATO_CONFIG_PATH", "/tmp/definitely-not-here.yaml");

    let s = Settings::load().unwrap();
    assert_eq!(s.dataset.delimiter, '~');
    assert_eq!(s.paths.tracks_file, "tracks.csv");
    assert_eq!(s.ui.histogram_bins, 10);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("staccato.yaml");
    std::fs::write(
        &cfg_path,
        r#"
ui:
  histogram_bins: 20
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("STACCATO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("STACCATO__UI__HISTOGRAM_BINS", "5");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.histogram_bins, 5);
}

#[test]
fn validate_rejects_zero_bins() {
    let mut s = Settings::default();
    s.ui.histogram_bins = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.violin_bins = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_tracks_file_missing_from_files_names() {
    let mut s = Settings::default();
    s.paths.tracks_file = "other.csv".to_string();
    assert!(s.validate().is_err());

    s.paths.files_names.push("other.csv".to_string());
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_empty_extension() {
    let mut s = Settings::default();
    s.dataset.extension = " . ".to_string();
    assert!(s.validate().is_err());
}
