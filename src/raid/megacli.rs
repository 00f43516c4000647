//! LSI MegaRAID controllers through `megacli`.

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::extract::{extract_first, extract_ids, Pattern};
use crate::raid::normalize::HealthChecks;
use crate::raid::types::{DriveAddress, FieldRule, StatusRecord};
use crate::raid::vendor::RaidVendor;

/// Adapter counters that must all read `0` on a healthy controller.
const HEALTH_COUNTERS: &[&str] = &["Degraded", "Offline", "Critical Disks", "Failed Disks"];

const LOGICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "State *: (.*)", "Optimal"),
    FieldRule::plain("size", "Size *: (.*)"),
];

const PHYSICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "Firmware state: (.*)", "Online, Spun Up"),
    FieldRule::plain("model", "Inquiry Data: (.*)"),
    FieldRule::plain("size", "Raw Size: (.*) \\["),
    FieldRule::plain("currenttemperature", "Drive Temperature :(\\d+)C"),
    FieldRule::health("smart", "Drive has flagged a S.M.A.R.T alert : (.*)", "No"),
];

pub struct Megacli<'r> {
    tool: Tool<'r>,
}

impl<'r> Megacli<'r> {
    pub fn new(tool: Tool<'r>) -> Self {
        Self { tool }
    }
}

fn adapter(controller: &str) -> String {
    format!("-a{}", controller)
}

impl RaidVendor for Megacli<'_> {
    fn controllers(&self) -> Result<Vec<String>> {
        let out = self.tool.run(&["-AdpGetPciInfo", "-aALL"])?;
        extract_ids(&out, "for Controller (\\d*)")
    }

    fn logical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self
            .tool
            .run(&["-LdInfo", "-Lall", &adapter(controller), "-NoLog"])?;
        extract_ids(&out, "Virtual Drive: (.*?)[\\s]")
    }

    fn physical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.tool.run(&["-PDList", &adapter(controller), "-NoLog"])?;
        let pairs = Pattern::new("Enclosure Device ID: (\\d+)\\nSlot Number: (\\d+)")?.pairs(&out);
        Ok(pairs
            .into_iter()
            .map(|(enclosure, slot)| DriveAddress { enclosure, slot }.join(':'))
            .collect())
    }

    fn controller_status(&self, controller: &str) -> Result<StatusRecord> {
        let out = self
            .tool
            .run(&["-AdpAllInfo", &adapter(controller), "-NoLog"])?;

        let mut checks = HealthChecks::new();
        for label in HEALTH_COUNTERS {
            let value = extract_first(&out, &format!("{}[\\s]+: (.*)", label))?;
            checks.check(label, &value, "0");
        }
        let model = extract_first(&out, "roduct Name[\\s]+: (.*)")?;

        let bbu = self.tool.run(&[
            "-AdpBbuCmd",
            "-GetBbuStatus",
            &adapter(controller),
            "-NoLog",
        ])?;
        let battery = extract_first(&bbu, "Battery State: (.*)")?;

        Ok(StatusRecord::new()
            .field("status", checks.summary())
            .field("model", model)
            .field("batterystatus", battery))
    }

    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self.tool.run(&[
            "-LdInfo",
            &format!("-L{}", drive),
            &adapter(controller),
            "-NoLog",
        ])?;
        StatusRecord::new().extract(&out, LOGICAL_DRIVE)
    }

    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let addr = DriveAddress::parse(drive, ':')?;
        let out = self.tool.run(&[
            "-pdInfo",
            &format!("-PhysDrv[{}]", addr.join(':')),
            &adapter(controller),
            "-NoLog",
        ])?;
        StatusRecord::new().extract(&out, PHYSICAL_DRIVE)
    }
}
