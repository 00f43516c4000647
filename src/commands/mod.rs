pub mod discovery;

use tracing::debug;

use crate::config::{Request, Target};
use crate::error::Result;
use crate::output::render_json;
use crate::raid::{RaidVendor, StatusRecord};

pub use discovery::{discover_controllers, discover_logical_drives, discover_physical_drives};

/// Execute `request` against `vendor` and render the JSON document.
pub fn handle_request(
    vendor: &dyn RaidVendor,
    request: &Request,
    indent: usize,
) -> Result<Vec<u8>> {
    match request {
        Request::Discover(Target::Controller) => {
            render_json(&discover_controllers(vendor)?, indent)
        }
        Request::Discover(Target::LogicalDrive) => {
            render_json(&discover_logical_drives(vendor)?, indent)
        }
        Request::Discover(Target::PhysicalDrive) => {
            render_json(&discover_physical_drives(vendor)?, indent)
        }
        Request::ControllerStatus { controller } => {
            render_status(vendor.controller_status(controller)?, indent)
        }
        Request::LogicalDriveStatus { controller, drive } => {
            render_status(vendor.logical_drive_status(controller, drive)?, indent)
        }
        Request::PhysicalDriveStatus { controller, drive } => {
            render_status(vendor.physical_drive_status(controller, drive)?, indent)
        }
    }
}

fn render_status(record: StatusRecord, indent: usize) -> Result<Vec<u8>> {
    debug!(status = record.status(), "status record");
    render_json(&record, indent)
}
