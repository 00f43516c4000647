// RAID inventory: extraction primitives and vendor drivers
pub mod types;
pub mod exec;
pub mod extract;
pub mod normalize;
pub mod vendor;
pub mod adaptec;
pub mod hp;
pub mod megacli;
pub mod marvell;
pub mod sas2ircu;

pub use exec::{SystemRunner, Tool};
pub use types::StatusRecord;
pub use vendor::{RaidVendor, VendorKind};
