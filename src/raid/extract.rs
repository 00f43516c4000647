//! Field extraction over free-text tool output.
//!
//! Vendor tools print `Label : value` listings with inconsistent spacing,
//! several records back to back and no machine-readable framing. Everything
//! here is best effort: a pattern that matches nothing yields an empty
//! string or an empty list, never an error.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::Result;

/// A compiled, line-oriented extraction pattern.
///
/// `^` and `$` match at line boundaries and `.` stops at newlines, so
/// `Label *: (.*)` captures the rest of one line.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).multi_line(true).build()?;
        Ok(Self { regex })
    }

    /// First capture group of the first match, or `""`.
    pub fn first(&self, raw: &str) -> String {
        let value = self
            .regex
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        debug!(pattern = %self.regex, value = %value, "extract first");
        value
    }

    /// First capture group of every non-overlapping match, in order.
    pub fn all(&self, raw: &str) -> Vec<String> {
        let values: Vec<String> = self
            .regex
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        debug!(pattern = %self.regex, ?values, "extract all");
        values
    }

    /// Like [`Pattern::all`] but for listing ids: captures are trimmed and
    /// ones left empty are dropped, so `"0   "` and `"1\r"` come back as
    /// ids the tool accepts as arguments.
    pub fn ids(&self, raw: &str) -> Vec<String> {
        let ids: Vec<String> = self
            .regex
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        debug!(pattern = %self.regex, ?ids, "extract ids");
        ids
    }

    /// Groups 1 and 2 of every match that has both.
    pub fn pairs(&self, raw: &str) -> Vec<(String, String)> {
        let values: Vec<(String, String)> = self
            .regex
            .captures_iter(raw)
            .filter_map(|caps| {
                let a = caps.get(1)?;
                let b = caps.get(2)?;
                Some((a.as_str().to_string(), b.as_str().to_string()))
            })
            .collect();
        debug!(pattern = %self.regex, ?values, "extract pairs");
        values
    }
}

/// Compile `pattern` and return its first capture in `raw`.
pub fn extract_first(raw: &str, pattern: &str) -> Result<String> {
    Ok(Pattern::new(pattern)?.first(raw))
}

/// Compile `pattern` and return every first capture in `raw`.
pub fn extract_all(raw: &str, pattern: &str) -> Result<Vec<String>> {
    Ok(Pattern::new(pattern)?.all(raw))
}

/// Compile `pattern` and return the trimmed, non-empty ids it lists in `raw`.
pub fn extract_ids(raw: &str, pattern: &str) -> Result<Vec<String>> {
    Ok(Pattern::new(pattern)?.ids(raw))
}

/// Lines from the first one containing `start` up to and including the
/// first one containing `end` (or the end of input).
pub fn slice_bounded(raw: &str, start: &str, end: &str) -> String {
    let mut block = String::new();
    let mut capture = false;

    for line in raw.lines() {
        if !capture && line.contains(start) {
            capture = true;
        }

        if capture {
            block.push_str(line);
            block.push('\n');

            if line.contains(end) {
                break;
            }
        }
    }

    block
}

/// Split `raw` into every record that opens on a `start` line.
///
/// A new `start` while a record is open closes the previous one. An `end`
/// line closes the open record and is kept in it. A record still open at
/// end of input never saw its `end` marker and is dropped.
pub fn slice_repeated(raw: &str, start: &str, end: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block = String::new();
    let mut capture = false;

    for line in raw.lines() {
        if line.contains(start) {
            if capture {
                blocks.push(std::mem::take(&mut block));
            }
            capture = true;
        }

        if capture {
            block.push_str(line);
            block.push('\n');

            if line.contains(end) {
                blocks.push(std::mem::take(&mut block));
                capture = false;
            }
        }
    }

    debug!(start, end, count = blocks.len(), "sliced records");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADAPTEC_LIST: &str = "\
Controllers found: 2
----------------------------------------------------------------------
Controller information
----------------------------------------------------------------------
   Controller ID             : Status, Slot, Mode, Name, SerialNumber, WWN
----------------------------------------------------------------------
   Controller 1:             : Optimal, Slot 1, RAID (Expose RAW), Adaptec ASR8405, 7A4463E1E1A, 50000D1E0051A700
   Controller 2:             : Optimal, Slot 4, RAID (Expose RAW), Adaptec ASR8405, 7A4463E1E1B, 50000D1E0051A701

Command completed successfully.
";

    #[test]
    fn test_all_skips_header_lines() {
        let ids = extract_all(ADAPTEC_LIST, "Controller ([^a-zA-Z].*?):").unwrap();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_all_is_reproducible() {
        let p = Pattern::new("Controller ([^a-zA-Z].*?):").unwrap();
        assert_eq!(p.all(ADAPTEC_LIST), p.all(ADAPTEC_LIST));
    }

    #[test]
    fn test_ids_trim_padding_and_crlf() {
        let raw = "Logical Device number 0   \nLogical Device number 1\r\nLogical Device number  \n";
        let pattern = "Logical Device number (.*)[\\s]";
        assert_eq!(
            extract_all(raw, pattern).unwrap(),
            vec!["0   ", "1\r", " "]
        );
        assert_eq!(extract_ids(raw, pattern).unwrap(), vec!["0", "1"]);
    }

    #[test]
    fn test_first_missing_is_empty() {
        assert_eq!(extract_first("Model : X", "Serial *: (.*)").unwrap(), "");
        assert!(extract_all("", "id: (.*)").unwrap().is_empty());
    }

    #[test]
    fn test_first_stops_at_line_end() {
        let raw = "Controller Status   : Optimal\nController Model    : Adaptec ASR8405\n";
        assert_eq!(
            extract_first(raw, "Controller Status *: (.*)").unwrap(),
            "Optimal"
        );
        assert_eq!(
            extract_first(raw, "^Controller Model *: (.*)$").unwrap(),
            "Adaptec ASR8405"
        );
    }

    #[test]
    fn test_first_takes_earliest_match() {
        let raw = "Size : 100 GB\nSize : 200 GB\n";
        assert_eq!(extract_first(raw, "Size *: (.*)").unwrap(), "100 GB");
    }

    #[test]
    fn test_pairs_across_lines() {
        let raw = "Enclosure Device ID: 32\nSlot Number: 0\nFoo\nEnclosure Device ID: 32\nSlot Number: 1\n";
        let p = Pattern::new("Enclosure Device ID: (\\d+)\\nSlot Number: (\\d+)").unwrap();
        assert_eq!(
            p.pairs(raw),
            vec![
                ("32".to_string(), "0".to_string()),
                ("32".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(Pattern::new("Status (").is_err());
    }

    #[test]
    fn test_slice_bounded() {
        let raw = "IR volume 1\n  Status : Okay (OKY)\nPhysical hard disks\nIR volume 2\n  Status : Degraded (DGD)\nPhysical hard disks\n";
        assert_eq!(
            slice_bounded(raw, "IR volume 2", "Physical"),
            "IR volume 2\n  Status : Degraded (DGD)\nPhysical hard disks\n"
        );
    }

    #[test]
    fn test_slice_bounded_runs_to_end_without_marker() {
        let raw = "a\nstart here\nb\nc";
        assert_eq!(slice_bounded(raw, "start", "never"), "start here\nb\nc\n");
        assert_eq!(slice_bounded(raw, "missing", "c"), "");
    }

    #[test]
    fn test_slice_repeated_drops_unterminated_tail() {
        let raw = "\
header
Device is a Hard disk
  Slot # : 0
Drive Type : SAS_HDD

Device is a Hard disk
  Slot # : 1
Drive Type : SAS_HDD
Device is a Hard disk
  Slot # : 2
";
        let blocks = slice_repeated(raw, "Device is a Hard disk", "Drive Type");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Device is a Hard disk\n  Slot # : 0\nDrive Type : SAS_HDD\n"
        );
        assert!(blocks[1].contains("Slot # : 1"));
        assert!(!blocks.iter().any(|b| b.contains("Slot # : 2")));
    }

    #[test]
    fn test_slice_repeated_adjacent_starts() {
        let raw = "START a\nx\nSTART b\ny\nEND\n";
        let blocks = slice_repeated(raw, "START", "END");
        assert_eq!(blocks, vec!["START a\nx\n", "START b\ny\nEND\n"]);
    }

    #[test]
    fn test_slice_repeated_ignores_stray_end() {
        let raw = "END\nSTART\nEND\nEND\n";
        assert_eq!(slice_repeated(raw, "START", "END"), vec!["START\nEND\n"]);
    }
}
