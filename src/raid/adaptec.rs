//! Adaptec controllers through `arcconf`.

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::extract::extract_ids;
use crate::raid::types::{DriveAddress, FieldRule, StatusRecord};
use crate::raid::vendor::RaidVendor;

const CONTROLLER: &[FieldRule] = &[
    FieldRule::health("status", "Controller Status *: (.*)", "Optimal"),
    FieldRule::plain("model", "Controller Model *: (.*)"),
    FieldRule::plain("temperature", "Temperature *: (.*) C"),
];

const LOGICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "Status of Logical Device *: (.*)", "Optimal"),
    FieldRule::plain("size", "Size *: (.*)"),
];

const PHYSICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "[\\s]{2}State *: (.*)", "Online"),
    FieldRule::plain("model", "Model *: (.*)"),
    FieldRule::health("smart", "S.M.A.R.T. *: (.*)", "No"),
    FieldRule::plain("smartwarnings", "S.M.A.R.T. warnings *: (.*)"),
    FieldRule::plain("totalsize", "Total Size *: (.*)"),
    FieldRule::plain("temperature", "Temperature *: (.*) C"),
];

pub struct Adaptec<'r> {
    tool: Tool<'r>,
}

impl<'r> Adaptec<'r> {
    pub fn new(tool: Tool<'r>) -> Self {
        Self { tool }
    }
}

impl RaidVendor for Adaptec<'_> {
    fn controllers(&self) -> Result<Vec<String>> {
        let out = self.tool.run(&["list"])?;
        extract_ids(&out, "Controller ([^a-zA-Z].*?):")
    }

    fn logical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.tool.run(&["getconfig", controller, "ld"])?;
        extract_ids(&out, "Logical Device number (.*)[\\s]")
    }

    fn physical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self.tool.run(&["getconfig", controller, "pd"])?;
        extract_ids(
            &out,
            "Device is a Hard drive[\\s\\S]*?Reported Channel,Device\\(T:L\\)[\\s]*[:][\\s](.*?)\\(.*\\)[\\s]",
        )
    }

    fn controller_status(&self, controller: &str) -> Result<StatusRecord> {
        let out = self.tool.run(&["getconfig", controller, "ad"])?;
        StatusRecord::new().extract(&out, CONTROLLER)
    }

    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self.tool.run(&["getconfig", controller, "ld", drive])?;
        StatusRecord::new().extract(&out, LOGICAL_DRIVE)
    }

    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let addr = DriveAddress::parse(drive, ',')?;
        let out = self
            .tool
            .run(&["getconfig", controller, "pd", &addr.enclosure, &addr.slot])?;
        StatusRecord::new().extract(&out, PHYSICAL_DRIVE)
    }
}
