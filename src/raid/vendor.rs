use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::Result;
use crate::raid::exec::Tool;
use crate::raid::types::StatusRecord;
use crate::raid::{adaptec, hp, marvell, megacli, sas2ircu};

/// Inventory and status operations every vendor driver provides.
///
/// Every id returned by a listing is accepted by the matching status call
/// for the same controller.
pub trait RaidVendor {
    fn controllers(&self) -> Result<Vec<String>>;
    fn logical_drives(&self, controller: &str) -> Result<Vec<String>>;
    fn physical_drives(&self, controller: &str) -> Result<Vec<String>>;
    fn controller_status(&self, controller: &str) -> Result<StatusRecord>;
    fn logical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord>;
    fn physical_drive_status(&self, controller: &str, drive: &str) -> Result<StatusRecord>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    /// Adaptec arcconf
    Adaptec,
    /// LSI MegaCLI
    Megacli,
    /// HPE Smart Storage (ssacli)
    Hp,
    /// Marvell mvcli
    Marvell,
    /// LSI sas2ircu
    Sas2ircu,
}

impl VendorKind {
    pub fn name(self) -> &'static str {
        match self {
            VendorKind::Adaptec => "adaptec",
            VendorKind::Megacli => "megacli",
            VendorKind::Hp => "hp",
            VendorKind::Marvell => "marvell",
            VendorKind::Sas2ircu => "sas2ircu",
        }
    }

    /// Binary looked up on `PATH` when nothing overrides it.
    pub fn default_binary(self) -> &'static str {
        match self {
            VendorKind::Adaptec => "arcconf",
            VendorKind::Megacli => "megacli",
            VendorKind::Hp => "ssacli",
            VendorKind::Marvell => "mvcli",
            VendorKind::Sas2ircu => "sas2ircu",
        }
    }

    pub fn driver<'r>(self, tool: Tool<'r>) -> Box<dyn RaidVendor + 'r> {
        match self {
            VendorKind::Adaptec => Box::new(adaptec::Adaptec::new(tool)),
            VendorKind::Megacli => Box::new(megacli::Megacli::new(tool)),
            VendorKind::Hp => Box::new(hp::Hp::new(tool)),
            VendorKind::Marvell => Box::new(marvell::Marvell::new(tool)),
            VendorKind::Sas2ircu => Box::new(sas2ircu::Sas2ircu::new(tool)),
        }
    }
}

impl fmt::Display for VendorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
