//! Discovery documents in the low-level discovery format monitoring
//! templates consume: `{"data":[{"{#CT_ID}":"0"}, ...]}`.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::raid::RaidVendor;

#[derive(Debug, Serialize)]
pub struct DiscoveryReply<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct ControllerItem {
    #[serde(rename = "{#CT_ID}")]
    pub ct: String,
}

#[derive(Debug, Serialize)]
pub struct LogicalDriveItem {
    #[serde(rename = "{#CT_ID}")]
    pub ct: String,
    #[serde(rename = "{#LD_ID}")]
    pub ld: String,
}

#[derive(Debug, Serialize)]
pub struct PhysicalDriveItem {
    #[serde(rename = "{#CT_ID}")]
    pub ct: String,
    #[serde(rename = "{#PD_ID}")]
    pub pd: String,
}

pub fn discover_controllers(vendor: &dyn RaidVendor) -> Result<DiscoveryReply<ControllerItem>> {
    let data = vendor
        .controllers()?
        .into_iter()
        .map(|ct| ControllerItem { ct })
        .collect();
    Ok(DiscoveryReply { data })
}

pub fn discover_logical_drives(
    vendor: &dyn RaidVendor,
) -> Result<DiscoveryReply<LogicalDriveItem>> {
    let mut data = Vec::new();
    for ct in vendor.controllers()? {
        let drives = vendor.logical_drives(&ct)?;
        debug!(controller = %ct, count = drives.len(), "logical drives");
        data.extend(drives.into_iter().map(|ld| LogicalDriveItem { ct: ct.clone(), ld }));
    }
    Ok(DiscoveryReply { data })
}

pub fn discover_physical_drives(
    vendor: &dyn RaidVendor,
) -> Result<DiscoveryReply<PhysicalDriveItem>> {
    let mut data = Vec::new();
    for ct in vendor.controllers()? {
        let drives = vendor.physical_drives(&ct)?;
        debug!(controller = %ct, count = drives.len(), "physical drives");
        data.extend(drives.into_iter().map(|pd| PhysicalDriveItem { ct: ct.clone(), pd }));
    }
    Ok(DiscoveryReply { data })
}
