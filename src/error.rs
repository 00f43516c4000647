//! Error types for raidstat

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions. A pattern that simply finds nothing is not one of them.
#[derive(Error, Debug)]
pub enum Error {
    /// The vendor binary could not be started
    #[error("failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The vendor binary exited unsuccessfully
    #[error("{tool} exited with {status}{}", fmt_stderr(.stderr))]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// Composite drive id with the wrong number of parts
    #[error("wrong device id '{id}', expected <enclosure>{delimiter}<slot>")]
    MalformedDriveId { id: String, delimiter: char },

    /// Extraction pattern failed to compile
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for our schema
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON rendering failed
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the rendered document failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Vendor stderr folded onto the single diagnostic line.
fn fmt_stderr(stderr: &str) -> String {
    let line = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if line.is_empty() {
        String::new()
    } else {
        format!(": {}", line)
    }
}
