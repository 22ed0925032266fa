//! Rendering batch results as text or JSON.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::linter::{Diagnostic, Severity};
use crate::workspace::{FileOutcome, FileReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Diagnostics below this severity are not shown.
    pub min_severity: Severity,
    pub format: OutputFormat,
    /// Emit ANSI colors in text output.
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            min_severity: Severity::Warning,
            format: OutputFormat::Text,
            color: false,
        }
    }
}

/// One line of the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRecord {
    pub rule: String,
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

pub fn render(reports: &[FileReport], options: &ReportOptions) -> Result<String, serde_json::Error> {
    match options.format {
        OutputFormat::Text => Ok(render_text(reports, options)),
        OutputFormat::Json => render_json(reports, options),
    }
}

/// Exit status for a finished run: 1 if any file failed or still has
/// error-severity diagnostics, whatever the display filter.
pub fn exit_status(reports: &[FileReport]) -> u8 {
    u8::from(reports.iter().any(FileReport::has_errors))
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn severity_label(severity: Severity, color: bool) -> String {
    match severity {
        Severity::Error => paint("error", "31", color),
        Severity::Warning => paint("warning", "33", color),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn visible<'a>(
    diagnostics: &'a [Diagnostic],
    options: &'a ReportOptions,
) -> impl Iterator<Item = &'a Diagnostic> + 'a {
    diagnostics
        .iter()
        .filter(move |d| d.severity >= options.min_severity)
}

fn render_text(reports: &[FileReport], options: &ReportOptions) -> String {
    let mut out = String::new();
    let mut issues = 0;
    let color = options.color;

    for report in reports {
        let file = display(&report.path);
        match &report.outcome {
            FileOutcome::Checked(result) => {
                for diag in visible(&result.diagnostics, options) {
                    issues += 1;
                    let _ = writeln!(
                        out,
                        "{}[{}]: {} at {}:{}:{}",
                        severity_label(diag.severity, color),
                        diag.code,
                        diag.message,
                        file,
                        diag.location.line,
                        diag.location.column
                    );
                    if let Some(fix) = &diag.fix {
                        let _ = writeln!(out, "  {}: {}", paint("help", "36", color), fix.message);
                    }
                }
                if let Some(summary) = &result.fix {
                    for skipped in &summary.skipped {
                        let _ = writeln!(
                            out,
                            "{}[{}]: fix skipped, overlapping edit ({}) in {}",
                            paint("note", "34", color),
                            skipped.code,
                            skipped.message,
                            file
                        );
                    }
                }
            }
            FileOutcome::ParseFailed(err) => {
                issues += 1;
                let _ = writeln!(
                    out,
                    "{}[parse-error]: {} at {}:{}:{}",
                    severity_label(Severity::Error, color),
                    err.message,
                    file,
                    err.line,
                    err.column
                );
            }
            FileOutcome::IoFailed(err) => {
                issues += 1;
                let _ = writeln!(
                    out,
                    "{}[io-error]: {} ({})",
                    severity_label(Severity::Error, color),
                    err,
                    file
                );
            }
            FileOutcome::Cancelled => {
                let _ = writeln!(out, "{}: {} not checked, run cancelled", paint("note", "34", color), file);
            }
        }
    }

    if issues == 0 {
        out.push_str("No issues found\n");
    } else {
        let _ = writeln!(out, "\nFound {issues} issue(s)");
    }
    out
}

/// Records in report order. Parse and I/O failures appear as `parse-error`
/// and `io-error` records so that every file is accounted for.
pub fn json_records(reports: &[FileReport], options: &ReportOptions) -> Vec<JsonRecord> {
    let mut records = Vec::new();

    for report in reports {
        let file = display(&report.path);
        match &report.outcome {
            FileOutcome::Checked(result) => {
                records.extend(visible(&result.diagnostics, options).map(|d| JsonRecord {
                    rule: d.code.clone(),
                    severity: d.severity,
                    file: file.clone(),
                    line: d.location.line,
                    column: d.location.column,
                    message: d.message.clone(),
                }));
            }
            FileOutcome::ParseFailed(err) => records.push(JsonRecord {
                rule: "parse-error".to_string(),
                severity: Severity::Error,
                file,
                line: err.line,
                column: err.column,
                message: err.message.clone(),
            }),
            FileOutcome::IoFailed(err) => records.push(JsonRecord {
                rule: "io-error".to_string(),
                severity: Severity::Error,
                file,
                line: 0,
                column: 0,
                message: err.to_string(),
            }),
            FileOutcome::Cancelled => {}
        }
    }

    records
}

fn render_json(reports: &[FileReport], options: &ReportOptions) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(&json_records(reports, options))?;
    out.push('\n');
    Ok(out)
}
