//! Marvell controllers through `mvcli`.
//!
//! mvcli keeps the current adapter in its own session: drive queries only
//! make sense after `adapter -i <id>` has been run.

use tracing::debug;

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::extract::{extract_first, extract_ids};
use crate::raid::normalize::HealthChecks;
use crate::raid::types::{FieldRule, StatusRecord};
use crate::raid::vendor::RaidVendor;

/// Firmware image states that must all read `Healthy`.
const IMAGE_HEALTH: &[&str] = &[
    "Image health",
    "Autoload image health",
    "Boot loader image health",
    "Firmware image health",
    "Boot ROM image health",
    "HBA info image health",
];

const LOGICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "VD status:[\\s]+(.*)", "optimal"),
    FieldRule::plain("name", "name:[\\s]+(.*)"),
    FieldRule::plain("size", "size:[\\s]+(.*)"),
    FieldRule::plain("raidmode", "RAID mode:[\\s]+(.*)"),
];

const PHYSICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "PD status:[\\s]+(.*)", "online"),
    FieldRule::plain("model", "model:[\\s]+(.*)"),
    FieldRule::plain("firmwareversion", "Firmware version:[\\s]+(.*)"),
    FieldRule::plain("size", "Size:[\\s]+(.*)"),
    FieldRule::plain("currentspeed", "Current speed:[\\s]+(.*)"),
];

pub struct Marvell<'r> {
    tool: Tool<'r>,
}

/// An adapter selected in the mvcli session, good for one query.
struct SelectedAdapter<'r> {
    tool: Tool<'r>,
}

impl SelectedAdapter<'_> {
    fn query(self, args: &[&str]) -> Result<String> {
        self.tool.run(args)
    }
}

impl<'r> Marvell<'r> {
    pub fn new(tool: Tool<'r>) -> Self {
        Self { tool }
    }

    fn select(&self, controller: &str) -> Result<SelectedAdapter<'r>> {
        debug!(controller, "selecting mvcli adapter");
        self.tool.run(&["adapter", "-i", controller])?;
        Ok(SelectedAdapter { tool: self.tool })
    }
}

impl RaidVendor for Marvell<'_> {
    fn controllers(&self) -> Result<Vec<String>> {
        let out = self.tool.run(&["info", "-o", "hba"])?;
        extract_ids(&out, "Adapter ID:[\\s]+(.*)")
    }

    fn logical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.select(controller)?.query(&["info", "-o", "ld"])?;
        extract_ids(&out, "id:[\\s]+(.*)")
    }

    fn physical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.select(controller)?.query(&["info", "-o", "pd"])?;
        extract_ids(&out, "PD ID:[\\s]+(.*)")
    }

    fn controller_status(&self, controller: &str) -> Result<StatusRecord> {
        let out = self.tool.run(&["info", "-o", "hba", "-i", controller])?;

        let mut checks = HealthChecks::new();
        for label in IMAGE_HEALTH {
            let value = extract_first(&out, &format!("{}:[\\s]+(.*)", label))?;
            checks.check(label, &value, "Healthy");
        }

        Ok(StatusRecord::new()
            .field("status", checks.summary())
            .field("modelnumber", extract_first(&out, "ModelNumber:[\\s]+(.*)")?)
            .field("partnumber", extract_first(&out, "PartNumber:[\\s]+(.*)")?))
    }

    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self
            .select(controller)?
            .query(&["info", "-o", "ld", "-i", drive])?;
        StatusRecord::new().extract(&out, LOGICAL_DRIVE)
    }

    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self
            .select(controller)?
            .query(&["info", "-o", "pd", "-i", drive])?;
        StatusRecord::new().extract(&out, PHYSICAL_DRIVE)
    }
}
