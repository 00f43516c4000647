use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};

use crate::config::{Request, Target};
use crate::raid::VendorKind;

const DISCOVERY_OPTIONS: &str = "ct | ld | pd";
const STATUS_OPTIONS: &str = "ct,<CONTROLLER_ID> | ld,<CONTROLLER_ID>,<LD_ID> | pd,<CONTROLLER_ID>,<PD_ID>";

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "raidstat")]
#[command(about = "Parse RAID vendor tool output and format it as JSON")]
#[command(group(ArgGroup::new("operation").required(true).args(["discover", "status"])))]
pub struct Cli {
    /// RAID tool vendor
    #[arg(short, long, value_enum, value_name = "VENDOR")]
    pub vendor: VendorKind,

    /// Discovery option, one of: ct | ld | pd
    #[arg(short, long, value_name = "OPTION", value_parser = parse_discovery)]
    pub discover: Option<Target>,

    /// Status option, one of: ct,<CONTROLLER_ID> | ld,<CONTROLLER_ID>,<LD_ID> | pd,<CONTROLLER_ID>,<PD_ID>
    #[arg(short, long, value_name = "OPTION", value_parser = parse_status)]
    pub status: Option<Request>,

    /// Indent JSON output by this many spaces per level (0 = compact)
    #[arg(short, long, value_name = "INT", default_value_t = 0)]
    pub indent: usize,

    /// Config file (YAML)
    #[arg(short, long, value_name = "PATH", env = "RAIDSTAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the vendor binary, overrides the config file
    #[arg(short, long, value_name = "PATH")]
    pub tool: Option<PathBuf>,
}

impl Cli {
    /// The operation selected by `--discover` or `--status`.
    pub fn request(&self) -> Request {
        match (self.discover, &self.status) {
            (Some(target), _) => Request::Discover(target),
            (None, Some(request)) => request.clone(),
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "one of --discover or --status is required",
                )
                .exit(),
        }
    }
}

fn parse_discovery(value: &str) -> Result<Target, String> {
    match value {
        "ct" => Ok(Target::Controller),
        "ld" => Ok(Target::LogicalDrive),
        "pd" => Ok(Target::PhysicalDrive),
        _ => Err(format!("must be one of '{}'", DISCOVERY_OPTIONS)),
    }
}

/// Split into at most three parts so ids like adaptec's `3,1` survive.
fn parse_status(value: &str) -> Result<Request, String> {
    let parts: Vec<&str> = value.splitn(3, ',').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(format!("must be one of '{}'", STATUS_OPTIONS));
    }

    let controller = parts.get(1).map(|s| s.to_string());
    let drive = parts.get(2).map(|s| s.to_string());

    match (parts[0], controller, drive) {
        ("ct", Some(controller), None) => Ok(Request::ControllerStatus { controller }),
        ("ld", Some(controller), Some(drive)) => {
            Ok(Request::LogicalDriveStatus { controller, drive })
        }
        ("pd", Some(controller), Some(drive)) => {
            Ok(Request::PhysicalDriveStatus { controller, drive })
        }
        _ => Err(format!("must be one of '{}'", STATUS_OPTIONS)),
    }
}
