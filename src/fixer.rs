//! Applying rule fixes to source text.
//!
//! A single [`apply_fixes`] pass splices every non-conflicting edit into a
//! copy of the input. [`fix`] repeats lint-and-apply until the text settles,
//! so edits dropped as overlapping in one pass get another chance in the next.

use std::path::Path;

use rowan::TextRange;
use scuff_parser::{ParseError, Syntax, parse};

use crate::config::Config;
use crate::linter::{self, Diagnostic, Edit};

/// Upper bound on lint-and-apply rounds in [`fix`].
pub const MAX_FIX_PASSES: usize = 8;

/// A fix that was not applied because it overlapped one that was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFix {
    pub code: String,
    pub message: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    /// Number of fixes applied.
    pub applied: usize,
    pub skipped: Vec<SkippedFix>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub output: String,
    /// Fixes applied over all passes.
    pub applied: usize,
    /// Overlapping fixes left over after the last pass.
    pub skipped: Vec<SkippedFix>,
    /// Diagnostics for the final text.
    pub diagnostics: Vec<Diagnostic>,
}

impl FixReport {
    pub fn changed(&self, input: &str) -> bool {
        self.output != input
    }
}

fn overlaps(a: TextRange, b: TextRange) -> bool {
    if a.is_empty() && b.is_empty() {
        return a.start() == b.start();
    }
    a.start() < b.end() && b.start() < a.end()
}

/// Apply the fixes carried by `diagnostics` to `input` in one pass.
///
/// Fixes are considered from the lowest offset up. A fix whose edits
/// overlap an edit already accepted is skipped and reported, except for exact
/// duplicates of an accepted edit, which are dropped silently. Accepted edits
/// are then spliced in from the highest offset down so that earlier offsets
/// stay valid.
pub fn apply_fixes(input: &str, diagnostics: &[Diagnostic]) -> FixOutcome {
    let mut candidates: Vec<(&Diagnostic, Vec<&Edit>)> = diagnostics
        .iter()
        .filter_map(|d| {
            let fix = d.fix.as_ref()?;
            let mut edits: Vec<&Edit> = fix.edits.iter().collect();
            edits.sort_by_key(|e| (e.range.start(), e.range.end()));
            (!edits.is_empty()).then_some((d, edits))
        })
        .collect();
    candidates.sort_by_key(|(_, edits)| (edits[0].range.start(), edits[0].range.end()));

    let mut accepted: Vec<&Edit> = Vec::new();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for (diagnostic, edits) in candidates {
        if edits.iter().all(|e| accepted.contains(e)) {
            log::debug!("Dropping duplicate fix from {}", diagnostic.code);
            continue;
        }

        let conflict = edits
            .iter()
            .any(|e| accepted.iter().any(|a| overlaps(a.range, e.range)));
        if conflict {
            log::debug!(
                "Skipping overlapping fix from {} at {}:{}",
                diagnostic.code,
                diagnostic.location.line,
                diagnostic.location.column
            );
            skipped.push(SkippedFix {
                code: diagnostic.code.clone(),
                message: diagnostic.message.clone(),
                range: diagnostic.location.range,
            });
            continue;
        }

        accepted.extend(edits);
        applied += 1;
    }

    accepted.sort_by_key(|e| std::cmp::Reverse((e.range.start(), e.range.end())));

    let mut output = input.to_string();
    for edit in accepted {
        let range = std::ops::Range::<usize>::from(edit.range);
        if range.end > output.len()
            || !output.is_char_boundary(range.start)
            || !output.is_char_boundary(range.end)
        {
            log::warn!("Ignoring edit outside of the input: {:?}", edit.range);
            continue;
        }
        output.replace_range(range, &edit.replacement);
    }

    FixOutcome {
        output,
        applied,
        skipped,
    }
}

/// Lint `input` and apply fixes until no fix applies or [`MAX_FIX_PASSES`]
/// rounds have run.
///
/// Only a parse failure of the original input is an error. If a round
/// produces text that no longer parses, the last parseable text is kept.
pub fn fix(
    input: &str,
    syntax: Syntax,
    path: Option<&Path>,
    config: &Config,
) -> Result<FixReport, ParseError> {
    let tree = parse(input, syntax)?.into_node();
    let mut diagnostics = linter::lint(&tree, input, syntax, path, config);
    let mut current = input.to_string();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for pass in 1..=MAX_FIX_PASSES {
        let outcome = apply_fixes(&current, &diagnostics);
        skipped = outcome.skipped;
        if outcome.applied == 0 {
            break;
        }

        let tree = match parse(&outcome.output, syntax) {
            Ok(sheet) => sheet.into_node(),
            Err(err) => {
                log::warn!("Fixes produced unparseable output ({err}), keeping previous text");
                skipped.clear();
                break;
            }
        };

        log::debug!("Fix pass {pass} applied {} fix(es)", outcome.applied);
        applied += outcome.applied;
        current = outcome.output;
        diagnostics = linter::lint(&tree, &current, syntax, path, config);
    }

    if !skipped.is_empty() {
        log::debug!("{} overlapping fix(es) left unapplied", skipped.len());
    }

    Ok(FixReport {
        output: current,
        applied,
        skipped,
        diagnostics,
    })
}
