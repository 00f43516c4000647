use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// Render `data` as JSON followed by a newline.
///
/// `indent == 0` gives a single compact line, otherwise each nesting level
/// is indented by `indent` spaces.
pub fn render_json<T: Serialize>(data: &T, indent: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if indent > 0 {
        let pad = " ".repeat(indent);
        let mut ser =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(pad.as_bytes()));
        data.serialize(&mut ser)?;
    } else {
        serde_json::to_writer(&mut buf, data)?;
    }
    buf.push(b'\n');
    Ok(buf)
}

pub fn write_stdout(document: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(document)?;
    stdout.flush()?;
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}
