//! Run configuration, resolved once from the command line and an optional
//! YAML file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::raid::VendorKind;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Which entity kind an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Controller,
    LogicalDrive,
    PhysicalDrive,
}

/// The single operation this run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Discover(Target),
    ControllerStatus {
        controller: String,
    },
    LogicalDriveStatus {
        controller: String,
        drive: String,
    },
    PhysicalDriveStatus {
        controller: String,
        drive: String,
    },
}

/// Contents of `config.yaml`.
///
/// ```yaml
/// tools:
///   adaptec: /usr/local/sbin/arcconf
/// log: debug
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tools: HashMap<VendorKind, PathBuf>,
    pub log: Option<String>,
}

#[derive(Debug)]
pub struct Config {
    pub vendor: VendorKind,
    pub request: Request,
    pub indent: usize,
    /// Vendor binary to invoke.
    pub binary: String,
    /// `tracing_subscriber` filter directive.
    pub log: String,
}

impl Config {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_file(path)?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => load_file(&path)?,
                None => FileConfig::default(),
            },
        };

        Ok(Self::build(
            cli,
            file,
            std::env::var("RAIDSTAT_DEBUG").ok().as_deref(),
        ))
    }

    fn build(cli: &Cli, mut file: FileConfig, debug_env: Option<&str>) -> Self {
        let vendor = cli.vendor;
        let binary = cli
            .tool
            .clone()
            .or_else(|| file.tools.remove(&vendor))
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| vendor.default_binary().to_string());

        Self {
            vendor,
            request: cli.request(),
            indent: cli.indent,
            binary,
            log: log_filter(debug_env, file.log),
        }
    }
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("raidstat").join("config.yaml"))
}

/// `RAIDSTAT_DEBUG=y` wins over the file setting.
fn log_filter(debug_env: Option<&str>, file: Option<String>) -> String {
    if debug_env == Some("y") {
        return "debug".to_string();
    }
    file.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("raidstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::build(&cli(&["-v", "hp", "-d", "ct"]), FileConfig::default(), None);
        assert_eq!(config.vendor, VendorKind::Hp);
        assert_eq!(config.binary, "ssacli");
        assert_eq!(config.indent, 0);
        assert_eq!(config.log, "warn");
        assert_eq!(config.request, Request::Discover(Target::Controller));
    }

    #[test]
    fn test_binary_precedence() {
        let mut file = FileConfig::default();
        file.tools
            .insert(VendorKind::Adaptec, PathBuf::from("/opt/arcconf"));
        file.tools.insert(VendorKind::Hp, PathBuf::from("/opt/ssacli"));

        let config = Config::build(&cli(&["-v", "adaptec", "-d", "pd"]), file, None);
        assert_eq!(config.binary, "/opt/arcconf");

        let mut file = FileConfig::default();
        file.tools
            .insert(VendorKind::Adaptec, PathBuf::from("/opt/arcconf"));
        let config = Config::build(
            &cli(&["-v", "adaptec", "-d", "pd", "-t", "/usr/sbin/arcconf"]),
            file,
            None,
        );
        assert_eq!(config.binary, "/usr/sbin/arcconf");
    }

    #[test]
    fn test_debug_env_overrides_file_log() {
        assert_eq!(log_filter(Some("y"), Some("info".to_string())), "debug");
        assert_eq!(log_filter(Some("n"), Some("info".to_string())), "info");
        assert_eq!(log_filter(None, None), "warn");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tools:\n  megacli: /opt/MegaRAID/MegaCli/MegaCli64\nlog: info").unwrap();

        let parsed = load_file(file.path()).unwrap();
        assert_eq!(
            parsed.tools.get(&VendorKind::Megacli),
            Some(&PathBuf::from("/opt/MegaRAID/MegaCli/MegaCli64"))
        );
        assert_eq!(parsed.log.as_deref(), Some("info"));
    }

    #[test]
    fn test_load_file_rejects_unknown_vendor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tools:\n  perc: /usr/bin/perccli").unwrap();
        assert!(matches!(load_file(file.path()), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_file(Path::new("/nonexistent/raidstat.yaml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
