use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::DatasetSettings;
use crate::duration::{DurationError, TrackDuration};

use super::model::Track;

/// Errors produced while loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: dataset has no header row", path.display())]
    Empty { path: PathBuf },

    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },

    #[error("{}:{line}: expected {expected} fields, found {found}", path.display())]
    RowWidth {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: invalid {column} value {value:?}", path.display())]
    InvalidField {
        path: PathBuf,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("{}:{line}: {source}", path.display())]
    Duration {
        path: PathBuf,
        line: usize,
        #[source]
        source: DurationError,
    },
}

const COL_NAME: &str = "track_name";
const COL_POPULARITY: &str = "track_popularity";
const COL_EXPLICIT: &str = "track_explicit";
const COL_DURATION_MS: &str = "track_duration_ms";

/// Column positions resolved from the header row.
struct Header {
    width: usize,
    name: usize,
    popularity: usize,
    explicit: usize,
    duration_ms: usize,
}

impl Header {
    fn parse(line: &str, delimiter: char, path: &Path) -> Result<Self, DatasetError> {
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        let find = |column: &'static str| -> Result<usize, DatasetError> {
            fields
                .iter()
                .position(|f| *f == column)
                .ok_or(DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            width: fields.len(),
            name: find(COL_NAME)?,
            popularity: find(COL_POPULARITY)?,
            explicit: find(COL_EXPLICIT)?,
            duration_ms: find(COL_DURATION_MS)?,
        })
    }
}

fn parse_explicit(value: &str) -> Option<bool> {
    // pandas writes Python booleans as `True`/`False`; accept the common
    // lowercase and numeric spellings too.
    match value {
        "True" | "true" | "TRUE" | "1" => Some(true),
        "False" | "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

/// Load a delimiter-separated track table.
///
/// The first row is a header; required columns are located by name in any
/// order and extra columns are ignored. Every data row must have the same
/// field count as the header. Malformed values fail fast with the offending
/// line number.
pub fn load(path: &Path, settings: &DatasetSettings) -> Result<Vec<Track>, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = settings.delimiter;
    let mut lines = text.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => {
            Header::parse(line.trim_end_matches('\r'), delimiter, path)?
        }
        _ => {
            return Err(DatasetError::Empty {
                path: path.to_path_buf(),
            });
        }
    };

    let mut tracks: Vec<Track> = Vec::new();

    for (idx, raw) in lines {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        // 1-based line numbers, counting the header.
        let line_no = idx + 1;

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != header.width {
            return Err(DatasetError::RowWidth {
                path: path.to_path_buf(),
                line: line_no,
                expected: header.width,
                found: fields.len(),
            });
        }

        let name = fields[header.name].trim().to_string();

        let popularity_raw = fields[header.popularity].trim();
        let popularity: f64 =
            popularity_raw
                .parse()
                .map_err(|_| DatasetError::InvalidField {
                    path: path.to_path_buf(),
                    line: line_no,
                    column: COL_POPULARITY,
                    value: popularity_raw.to_string(),
                })?;

        let explicit_raw = fields[header.explicit].trim();
        let explicit = parse_explicit(explicit_raw).ok_or_else(|| DatasetError::InvalidField {
            path: path.to_path_buf(),
            line: line_no,
            column: COL_EXPLICIT,
            value: explicit_raw.to_string(),
        })?;

        let duration_raw = fields[header.duration_ms].trim();
        let duration_ms: i64 = duration_raw
            .parse()
            .map_err(|_| DatasetError::InvalidField {
                path: path.to_path_buf(),
                line: line_no,
                column: COL_DURATION_MS,
                value: duration_raw.to_string(),
            })?;
        let duration =
            TrackDuration::from_ms(duration_ms).map_err(|source| DatasetError::Duration {
                path: path.to_path_buf(),
                line: line_no,
                source,
            })?;

        tracks.push(Track {
            name,
            popularity,
            explicit,
            duration,
        });
    }

    Ok(tracks)
}
