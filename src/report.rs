//! Result reporting.
//!
//! Serializes a [`SpecQueryResult`] for the caller. JSON is the default and is
//! what scripts should consume; YAML and plain text exist for people.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::core::SpecqError;
use crate::spec::SpecQueryResult;

/// Output format for query results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Pretty-printed JSON object with `version` and `packages`.
    #[default]
    Json,
    /// YAML document with the same fields as JSON.
    Yaml,
    /// Human-readable text.
    Text,
}

/// Something that can be reported in every [`ReportFormat`].
pub trait Report: Serialize {
    /// Plain-text rendering, one line per item.
    fn render_text(&self) -> String;
}

impl Report for SpecQueryResult {
    fn render_text(&self) -> String {
        let mut out = format!("{} {}\n", "version:".bold(), self.version);
        for name in &self.package_names {
            out.push_str(&format!("{} {}\n", "package:".bold(), name));
        }
        out
    }
}

/// Write `value` to `writer` in `format`.
///
/// # Errors
///
/// [`SpecqError::Reporting`] if serialization or the write fails.
pub fn report_result<W: Write, T: Report>(
    writer: &mut W,
    value: &T,
    format: ReportFormat,
) -> Result<(), SpecqError> {
    let rendered = match format {
        ReportFormat::Json => serde_json::to_string_pretty(value)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| reporting_error(&e))?,
        ReportFormat::Yaml => serde_yaml::to_string(value).map_err(|e| reporting_error(&e))?,
        ReportFormat::Text => value.render_text(),
    };

    writer.write_all(rendered.as_bytes()).map_err(|e| reporting_error(&e))?;
    writer.flush().map_err(|e| reporting_error(&e))
}

fn reporting_error(e: &dyn std::fmt::Display) -> SpecqError {
    SpecqError::Reporting {
        reason: e.to_string(),
    }
}
