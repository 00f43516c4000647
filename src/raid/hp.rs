//! HPE Smart Array controllers through `ssacli`.
//!
//! ssacli already reports healthy components as `OK`, so most fields are
//! passed through and only trimmed.

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::extract::extract_ids;
use crate::raid::types::{FieldRule, StatusRecord};
use crate::raid::vendor::RaidVendor;

const CONTROLLER: &[FieldRule] = &[
    FieldRule::health("status", "Controller Status *: (.*)", "OK"),
    FieldRule::plain("model", "(.*) in Slot"),
    FieldRule::plain("batterystatus", "Battery/Capacitor Status *: (.*)"),
    FieldRule::plain("cachestatus", "Cache Status *: (.*)"),
];

const LOGICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "Status *: (.*)", "OK"),
    FieldRule::plain("size", "Size *: (.*)"),
];

const PHYSICAL_DRIVE: &[FieldRule] = &[
    FieldRule::health("status", "[\\s]{2}Status: (.*)", "OK"),
    FieldRule::plain("model", "Model: (.*)"),
    FieldRule::plain("size", "[\\s]{2}Size: (.*)"),
    FieldRule::plain("currenttemperature", "Current Temperature \\(C\\): (.*)"),
    FieldRule::plain("maximumtemperature", "Maximum Temperature \\(C\\): (.*)"),
];

pub struct Hp<'r> {
    tool: Tool<'r>,
}

impl<'r> Hp<'r> {
    pub fn new(tool: Tool<'r>) -> Self {
        Self { tool }
    }
}

fn slot(controller: &str) -> String {
    format!("slot={}", controller)
}

impl RaidVendor for Hp<'_> {
    fn controllers(&self) -> Result<Vec<String>> {
        let out = self.tool.run(&["ctrl", "all", "show"])?;
        extract_ids(&out, "in Slot (.*?)[\\s]")
    }

    fn logical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self
            .tool
            .run(&["ctrl", &slot(controller), "ld", "all", "show"])?;
        extract_ids(&out, "logicaldrive (.*?)[\\s]")
    }

    fn physical_drives(&self, controller: &str) -> Result<Vec<String>> {
        let out = self
            .tool
            .run(&["ctrl", &slot(controller), "pd", "all", "show"])?;
        extract_ids(&out, "physicaldrive (.*?)[\\s]")
    }

    fn controller_status(&self, controller: &str) -> Result<StatusRecord> {
        let out = self
            .tool
            .run(&["ctrl", &slot(controller), "show", "status"])?;
        StatusRecord::new().extract(&out, CONTROLLER)
    }

    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self
            .tool
            .run(&["ctrl", &slot(controller), "ld", drive, "show", "detail"])?;
        StatusRecord::new().extract(&out, LOGICAL_DRIVE)
    }

    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord> {
        let out = self
            .tool
            .run(&["ctrl", &slot(controller), "pd", drive, "show", "detail"])?;
        StatusRecord::new().extract(&out, PHYSICAL_DRIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raid::exec::fake::FakeRunner;

    const CTRL_ALL: &str = "
Smart Array P420i in Slot 0 (Embedded)    (sn: 001438031A5B3C0)

";

    const CTRL_STATUS: &str = "
Smart Array P420i in Slot 0 (Embedded)
   Controller Status: OK
   Cache Status: OK
   Battery/Capacitor Status: Failed (Replace Batteries)

";

    const LD_ALL: &str = "
Smart Array P420i in Slot 0 (Embedded)    (sn: 001438031A5B3C0)

   Array A

      logicaldrive 1 (279.4 GB, RAID 1, OK)

   Array B

      logicaldrive 2 (1.6 TB, RAID 5, Interim Recovery Mode)
";

    const LD_DETAIL: &str = "
Smart Array P420i in Slot 0 (Embedded)

   Array B

      Logical Drive: 2
         Size: 1.6 TB
         Fault Tolerance: 5
         Status: Interim Recovery Mode
";

    const PD_ALL: &str = "
Smart Array P420i in Slot 0 (Embedded)    (sn: 001438031A5B3C0)

   Array A

      physicaldrive 1I:1:1 (port 1I:box 1:bay 1, SAS HDD, 300 GB, OK)
      physicaldrive 1I:1:2 (port 1I:box 1:bay 2, SAS HDD, 300 GB, OK)
";

    const PD_DETAIL: &str = "
Smart Array P420i in Slot 0 (Embedded)

   Array A

      physicaldrive 1I:1:1
         Port: 1I
         Box: 1
         Bay: 1
         Status: OK
         Drive Type: Data Drive
         Interface Type: SAS
         Size: 300 GB
         Current Temperature (C): 31
         Maximum Temperature (C): 43
         Model: HP      EG0300FBDSP
";

    fn runner() -> FakeRunner {
        FakeRunner::new()
            .respond("ctrl all show", CTRL_ALL)
            .respond("ctrl slot=0 show status", CTRL_STATUS)
            .respond("ctrl slot=0 ld all show", LD_ALL)
            .respond("ctrl slot=0 ld 2 show detail", LD_DETAIL)
            .respond("ctrl slot=0 pd all show", PD_ALL)
            .respond("ctrl slot=0 pd 1I:1:1 show detail", PD_DETAIL)
    }

    #[test]
    fn test_listings() {
        let runner = runner();
        let v = Hp::new(Tool::new("ssacli", &runner));
        assert_eq!(v.controllers().unwrap(), vec!["0"]);
        assert_eq!(v.logical_drives("0").unwrap(), vec!["1", "2"]);
        assert_eq!(v.physical_drives("0").unwrap(), vec!["1I:1:1", "1I:1:2"]);
    }

    #[test]
    fn test_controller_status() {
        let runner = runner();
        let v = Hp::new(Tool::new("ssacli", &runner));
        let record = v.controller_status("0").unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"status":"OK","model":"Smart Array P420i","batterystatus":"Failed (Replace Batteries)","cachestatus":"OK"}"#
        );
    }

    #[test]
    fn test_logical_drive_status() {
        let runner = runner();
        let v = Hp::new(Tool::new("ssacli", &runner));
        let record = v.logical_drive_status("0", "2").unwrap();
        assert_eq!(record.status(), "Interim Recovery Mode");
        assert_eq!(record.get("size"), Some("1.6 TB"));
    }

    #[test]
    fn test_physical_drive_status() {
        let runner = runner();
        let v = Hp::new(Tool::new("ssacli", &runner));
        let id = &v.physical_drives("0").unwrap()[0];
        let record = v.physical_drive_status("0", id).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"status":"OK","model":"HP      EG0300FBDSP","size":"300 GB","currenttemperature":"31","maximumtemperature":"43"}"#
        );
    }
}
