//! Error type shared by loading, selection and rendering

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShotChartError {
    /// One or more season files are absent; nothing is rendered.
    #[error("no shot data available (missing: {})", display_paths(.missing))]
    NoData { missing: Vec<PathBuf> },

    #[error("season must be a 4-digit year, got {0:?}")]
    InvalidSeason(String),

    #[error("game id must be an integer, got {0:?}")]
    InvalidGameId(String),

    #[error("unrecognised game date {0:?} (expected YYYY-MM-DD, MM-DD-YYYY or MM/DD/YYYY)")]
    InvalidDate(String),

    #[error("malformed shot row: {0}")]
    MalformedRow(String),

    #[error("unknown plot style {0:?} (expected simple, kde or hex)")]
    UnknownStyle(String),

    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShotChartError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_lists_missing_files() {
        let err = ShotChartError::NoData {
            missing: vec![
                PathBuf::from("data/NBA_2004_Shots.csv"),
                PathBuf::from("data/NBA_2005_Shots.csv"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("NBA_2004_Shots.csv"));
        assert!(msg.contains("NBA_2005_Shots.csv"));
    }
}
