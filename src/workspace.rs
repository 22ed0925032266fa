//! Multi-file runs: expanding input paths, linting or fixing each file on the
//! rayon pool, and collecting per-file results in input order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use ignore::WalkBuilder;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use scuff_parser::{ParseError, Syntax, parse};

use crate::config::Config;
use crate::error::ConfigError;
use crate::fixer::{self, SkippedFix};
use crate::linter::{self, Diagnostic, Severity};

/// A stylesheet to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub path: PathBuf,
    pub syntax: Syntax,
}

/// Shared flag checked before each file starts.
#[derive(Debug, Default)]
pub struct CancelToken {
    flag: AtomicBool,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Lint,
    /// Apply fixes. With `write` unset the fixed text is computed but the
    /// file is left alone.
    Fix { write: bool },
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub enum FileOutcome {
    Checked(FileResult),
    ParseFailed(ParseError),
    IoFailed(io::Error),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    /// Diagnostics left in the file after any fixes.
    pub diagnostics: Vec<Diagnostic>,
    pub fix: Option<FixSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSummary {
    pub original: String,
    pub output: String,
    pub applied: usize,
    pub skipped: Vec<SkippedFix>,
}

impl FixSummary {
    pub fn changed(&self) -> bool {
        self.original != self.output
    }
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        match &self.outcome {
            FileOutcome::Checked(result) => result
                .diagnostics
                .iter()
                .any(|d| d.severity == Severity::Error),
            FileOutcome::ParseFailed(_) | FileOutcome::IoFailed(_) | FileOutcome::Cancelled => {
                true
            }
        }
    }
}

fn classify(path: &Path) -> Result<Syntax, ConfigError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if ext.eq_ignore_ascii_case("sass") {
        return Err(ConfigError::IndentedSyntax(path.to_path_buf()));
    }
    Syntax::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedExtension(path.to_path_buf()))
}

/// Expand `paths` into the stylesheets to process.
///
/// Files are taken as given. Directories are walked (honoring ignore files)
/// for `.css` and `.scss` files not matched by `exclude`. Any `.sass` file is
/// a configuration error.
pub fn collect_inputs(paths: &[PathBuf], config: &Config) -> Result<Vec<Input>, ConfigError> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_file() {
            let syntax = classify(path)?;
            inputs.push(Input {
                path: path.clone(),
                syntax,
            });
            continue;
        }
        if !path.is_dir() {
            return Err(ConfigError::MissingInput(path.clone()));
        }

        let walker = WalkBuilder::new(path)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry under {}: {err}", path.display());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let file = entry.path();
            if config.is_excluded(file) {
                log::debug!("Excluded: {}", file.display());
                continue;
            }
            match classify(file) {
                Ok(syntax) => inputs.push(Input {
                    path: file.to_path_buf(),
                    syntax,
                }),
                Err(err @ ConfigError::IndentedSyntax(_)) => return Err(err),
                Err(_) => {}
            }
        }
    }

    log::debug!("Collected {} input file(s)", inputs.len());
    Ok(inputs)
}

fn detect_line_ending(input: &str) -> &'static str {
    let rn_pos = input.find("\r\n");
    let n_pos = input.find('\n');

    match (rn_pos, n_pos) {
        (Some(rn), Some(n)) if rn < n => "\r\n",
        _ => "\n",
    }
}

/// Lint or fix one file. I/O and parse failures are part of the outcome.
pub fn process_file(input: &Input, config: &Config, mode: RunMode) -> FileOutcome {
    log::debug!("Processing {}", input.path.display());

    let raw = match fs::read_to_string(&input.path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("Failed to read {}: {err}", input.path.display());
            return FileOutcome::IoFailed(err);
        }
    };
    let line_ending = detect_line_ending(&raw);
    let source = raw.replace("\r\n", "\n");
    let path = Some(input.path.as_path());

    match mode {
        RunMode::Lint => match parse(&source, input.syntax) {
            Ok(sheet) => {
                let tree = sheet.into_node();
                let diagnostics = linter::lint(&tree, &source, input.syntax, path, config);
                FileOutcome::Checked(FileResult {
                    diagnostics,
                    fix: None,
                })
            }
            Err(err) => FileOutcome::ParseFailed(err),
        },
        RunMode::Fix { write } => {
            let report = match fixer::fix(&source, input.syntax, path, config) {
                Ok(report) => report,
                Err(err) => return FileOutcome::ParseFailed(err),
            };

            let summary = FixSummary {
                original: source,
                output: report.output,
                applied: report.applied,
                skipped: report.skipped,
            };

            if write && summary.changed() {
                let text = if line_ending == "\r\n" {
                    summary.output.replace('\n', "\r\n")
                } else {
                    summary.output.clone()
                };
                if let Err(err) = fs::write(&input.path, text) {
                    log::warn!("Failed to write {}: {err}", input.path.display());
                    return FileOutcome::IoFailed(err);
                }
                log::info!(
                    "Applied {} fix(es) to {}",
                    summary.applied,
                    input.path.display()
                );
            }

            FileOutcome::Checked(FileResult {
                diagnostics: report.diagnostics,
                fix: Some(summary),
            })
        }
    }
}

/// Process `inputs` in parallel. Reports come back in input order. Files not
/// yet started when `cancel` is set are reported as cancelled; with
/// `fail_fast`, the first file left with errors sets it.
pub fn run_batch(
    inputs: &[Input],
    config: &Config,
    mode: RunMode,
    fail_fast: bool,
    cancel: &CancelToken,
) -> Vec<FileReport> {
    inputs
        .par_iter()
        .map(|input| {
            let outcome = if cancel.is_cancelled() {
                log::debug!("Cancelled before {}", input.path.display());
                FileOutcome::Cancelled
            } else {
                process_file(input, config, mode)
            };
            let report = FileReport {
                path: input.path.clone(),
                outcome,
            };
            if fail_fast && report.has_errors() {
                cancel.cancel();
            }
            report
        })
        .collect()
}
