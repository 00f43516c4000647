//! Health vocabulary normalization.

/// Canonical healthy token emitted for every vendor.
pub const OK: &str = "OK";

/// Map a vendor's healthy literal to `"OK"`, pass anything else through trimmed.
pub fn normalize(raw: &str, healthy: &str) -> String {
    let value = raw.trim();
    if value == healthy {
        OK.to_string()
    } else {
        value.to_string()
    }
}

/// Many-fields-to-one-status reduction for controller health.
///
/// Each check whose value differs from its baseline becomes a
/// `"<label> is <value>"` clause.
#[derive(Debug, Default)]
pub struct HealthChecks {
    clauses: Vec<String>,
}

impl HealthChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, label: &str, value: &str, baseline: &str) -> &mut Self {
        let value = value.trim();
        if value != baseline {
            self.clauses.push(format!("{} is {}", label, value));
        }
        self
    }

    /// `"OK"` when every check matched its baseline.
    pub fn summary(&self) -> String {
        if self.clauses.is_empty() {
            OK.to_string()
        } else {
            self.clauses.join(", ")
        }
    }
}
