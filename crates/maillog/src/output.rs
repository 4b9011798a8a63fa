use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use maillog_sessions::SessionRecord;

/// Render sessions as a tab-indented JSON array followed by a newline.
///
/// serde_json never escapes `<`, `>` or `&`, so addresses such as
/// `<alice@example.org>` come out verbatim.
pub fn render_sessions(sessions: &[SessionRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    sessions
        .serialize(&mut serializer)
        .context("Failed to serialize sessions")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("Serialized sessions are not valid UTF-8")
}

/// Write the rendered report to `output`, or stdout when no path is given.
pub fn write_report(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(report.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write output to stdout")
        }
    }
}
