//! LSI SAS2 integrated RAID through `sas2ircu`.
//!
//! Everything per controller comes from a single `<id> display` listing;
//! volumes and disks are carved out of it as records.

use tracing::warn;

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::extract::{
    extract_all, extract_first, extract_ids, slice_bounded, slice_repeated, Pattern,
};
use crate::raid::normalize::HealthChecks;
use crate::raid::types::{DriveAddress, FieldRule, StatusRecord};
use crate::raid::vendor::RaidVendor;

const DISK_START: &str = "Device is a Hard disk";
const DISK_END: &str = "Drive Type";

const LOGICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "Status of volume *: (.*)", "Okay (OKY)"),
    FieldRule::plain("size", "Size \\(in MB\\) *: (.*)"),
];

const PHYSICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "[\\s]{2}State *: (.*)", "Optimal (OPT)"),
    FieldRule::plain("model", "Model Number *: (.*)"),
    FieldRule::plain("totalsize", "Size \\(in MB\\)/\\(in sectors\\) *: (\\d+)/\\d+"),
];

pub struct Sas2ircu<'r> {
    tool: Tool<'r>,
}

/// A hard disk record from the display listing with its address.
struct Disk {
    address: DriveAddress,
    block: String,
}

impl<'r> Sas2ircu<'r> {
    pub fn new(tool: Tool<'r>) -> Self {
        Self { tool }
    }

    fn display(&self, controller: &str) -> Result<String> {
        self.tool.run(&[controller, "display"])
    }

    /// Disk records that carry both an enclosure and a slot.
    fn disks(raw: &str) -> Result<Vec<Disk>> {
        let enclosure = Pattern::new("Enclosure # *: (.*)")?;
        let slot = Pattern::new("Slot # *: (.*)")?;

        Ok(slice_repeated(raw, DISK_START, DISK_END)
            .into_iter()
            .filter_map(|block| {
                let enclosure = enclosure.first(&block).trim().to_string();
                let slot = slot.first(&block).trim().to_string();
                if enclosure.is_empty() || slot.is_empty() {
                    return None;
                }
                Some(Disk {
                    address: DriveAddress { enclosure, slot },
                    block,
                })
            })
            .collect())
    }
}

impl RaidVendor for Sas2ircu<'_> {
    fn controllers(&self) -> Result<Vec<String>> {
        let out = self.tool.run(&["list"])?;
        extract_ids(&out, "\\s+(\\d+)\\s+.*")
    }

    fn logical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.display(controller)?;
        extract_ids(&out, "IR volume (\\d+)")
    }

    fn physical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.display(controller)?;
        Ok(Self::disks(&out)?
            .into_iter()
            .map(|disk| disk.address.join(':'))
            .collect())
    }

    fn controller_status(&self, controller: &str) -> Result<StatusRecord> {
        let out = self.display(controller)?;

        let mut checks = HealthChecks::new();
        for code in extract_all(&out, "Status of volume\\s+: .*\\((.*)\\)")? {
            checks.check("Status of volume", &code, "OKY");
        }

        Ok(StatusRecord::new()
            .field("status", checks.summary())
            .field("model", extract_first(&out, "Controller type *: (.*)")?))
    }

    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self.display(controller)?;
        let volume = slice_bounded(&out, &format!("IR volume {}", drive), "Physical");
        StatusRecord::new().extract(&volume, LOGICAL_DRIVE)
    }

    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let addr = DriveAddress::parse(drive, ':')?;
        let out = self.display(controller)?;

        match Self::disks(&out)?.into_iter().find(|disk| disk.address == addr) {
            Some(disk) => StatusRecord::new().extract(&disk.block, PHYSICAL_DRIVE),
            None => {
                warn!(controller, drive, "no hard disk record for this address");
                Ok(StatusRecord::blank(PHYSICAL_DRIVE))
            }
        }
    }
}
