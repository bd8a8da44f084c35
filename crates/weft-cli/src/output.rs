//! Output layer: human-readable text or stable JSON, per command.
//!
//! Every command handler receives an [`OutputMode`] and renders
//! accordingly. JSON output is the machine contract (one value per
//! command, serialized with serde); human output is free to change.

use serde::Serialize;
use std::io::{self, Write};

/// Width of the separator rule in human output.
pub const RULE_WIDTH: usize = 64;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` to stdout: pretty JSON in JSON mode, else the
/// supplied human formatter.
///
/// # Errors
///
/// Fails if serialization or the write to stdout fails.
pub fn render<T, F>(mode: OutputMode, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        human(value, &mut out)?;
    }
    Ok(())
}

/// Write a horizontal separator rule.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a left-aligned key/value line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}
