use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::raid::extract::Pattern;
use crate::raid::normalize::normalize;

/// Flat health/attribute record for one controller, logical or physical drive.
///
/// Serialized as a JSON object in insertion order. Values are trimmed and a
/// field whose pattern found nothing is present with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    fields: Vec<(&'static str, String)>,
}

impl StatusRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.fields.push((name, value.as_ref().trim().to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn status(&self) -> &str {
        self.get("status").unwrap_or_default()
    }

    /// Apply `rules` to `raw`, appending one field per rule.
    pub fn extract(mut self, raw: &str, rules: &[FieldRule]) -> Result<Self> {
        for rule in rules {
            let value = Pattern::new(rule.pattern)?.first(raw);
            let value = match rule.healthy {
                Some(healthy) => normalize(&value, healthy),
                None => value,
            };
            self = self.field(rule.name, value);
        }
        Ok(self)
    }

    /// A record with every rule's field present and empty.
    pub fn blank(rules: &[FieldRule]) -> Self {
        rules
            .iter()
            .fold(Self::new(), |record, rule| record.field(rule.name, ""))
    }
}

impl Serialize for StatusRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One row of a vendor pattern table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub pattern: &'static str,
    /// Literal the vendor prints when this field is healthy.
    pub healthy: Option<&'static str>,
}

impl FieldRule {
    pub const fn plain(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            pattern,
            healthy: None,
        }
    }

    pub const fn health(name: &'static str, pattern: &'static str, healthy: &'static str) -> Self {
        Self {
            name,
            pattern,
            healthy: Some(healthy),
        }
    }
}

/// Physical drive addressed by enclosure and slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveAddress {
    pub enclosure: String,
    pub slot: String,
}

impl DriveAddress {
    /// Split `"<enclosure><delimiter><slot>"`; anything else is rejected.
    pub fn parse(id: &str, delimiter: char) -> Result<Self> {
        let malformed = || Error::MalformedDriveId {
            id: id.to_string(),
            delimiter,
        };

        let (enclosure, slot) = id.split_once(delimiter).ok_or_else(malformed)?;
        let (enclosure, slot) = (enclosure.trim(), slot.trim());
        if enclosure.is_empty() || slot.is_empty() || slot.contains(delimiter) {
            return Err(malformed());
        }

        Ok(Self {
            enclosure: enclosure.to_string(),
            slot: slot.to_string(),
        })
    }

    pub fn join(&self, delimiter: char) -> String {
        format!("{}{}{}", self.enclosure, delimiter, self.slot)
    }
}
