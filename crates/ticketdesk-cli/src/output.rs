//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts, or stable
//! JSON. The mode itself is resolved by `ticketdesk_core::config` (flag,
//! `FORMAT` env, user config, TTY detection).
//!
//! Results go to stdout. Errors and store notices go to stderr so JSON on
//! stdout stays parseable.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use ticketdesk_core::FieldErrors;
use ticketdesk_core::notify::{Notice, NoticeLevel};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Token-efficient plain text rows for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// Map a resolved mode name back to a mode. Unknown names fall back to text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Returns `true` if pretty output was requested.
    #[must_use]
    pub const fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
pub trait Renderable {
    /// Render for human consumption: labelled fields, visual framing.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON object.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row (no header; see [`Renderable::table_headers`]).
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode, in the same order as `render_table` fields.
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Write a single [`Renderable`] item in the given mode.
pub fn write_item<R: Renderable>(w: &mut dyn Write, item: &R, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(w),
        OutputMode::Text => item.render_table(w),
        OutputMode::Json => {
            item.render_json(w)?;
            writeln!(w)
        }
    }
}

/// Render a single [`Renderable`] item to stdout.
pub fn render_item<R: Renderable>(item: &R, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_item(&mut out, item, mode)
}

/// Write a list of [`Renderable`] items.
///
/// - In JSON mode, wraps items in a JSON array.
/// - In text mode, prints a header row then one row per item.
/// - In pretty mode, renders items sequentially.
pub fn write_list<R: Renderable>(w: &mut dyn Write, items: &[R], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(w)?;
            }
        }
        OutputMode::Text => {
            let headers = if items.is_empty() {
                &[] as &[&str]
            } else {
                R::table_headers()
            };
            if !headers.is_empty() {
                writeln!(w, "{}", headers.join("  "))?;
            }
            for item in items {
                item.render_table(w)?;
            }
        }
        OutputMode::Json => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, ",")?;
                }
                writeln!(w)?;
                let mut buf = Vec::new();
                item.render_json(&mut buf)?;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                w.write_all(&buf)?;
            }
            writeln!(w, "\n]")?;
        }
    }
    Ok(())
}

/// Render a list of [`Renderable`] items to stdout.
pub fn render_list<R: Renderable>(items: &[R], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_list(&mut out, items, mode)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with optional suggestion, error code and field errors.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl CliError {
    /// Create an error with a suggestion and error code.
    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
            fields: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: FieldErrors) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Write an error in the requested format.
pub fn write_error(w: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *w, &wrapper)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "error: {}", error.message)?;
            if let Some(ref fields) = error.fields {
                for (field, message) in fields.iter() {
                    writeln!(w, "  {field}: {message}")?;
                }
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(w, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

/// Write store notices. JSON mode stays silent; the result object carries the outcome.
pub fn write_notices(w: &mut dyn Write, mode: OutputMode, notices: &[Notice]) -> io::Result<()> {
    if mode.is_json() {
        return Ok(());
    }
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => writeln!(w, "✓ {}", notice.message)?,
            NoticeLevel::Error => writeln!(w, "✗ {}", notice.message)?,
        }
    }
    Ok(())
}

/// Render store notices to stderr.
pub fn render_notices(mode: OutputMode, notices: &[Notice]) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_notices(&mut out, mode, notices)
}
