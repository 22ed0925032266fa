use std::collections::HashSet;

use rowan::TextRange;

use crate::linter::diagnostics::Diagnostic;

/// Accumulates the diagnostics of one file.
///
/// A diagnostic repeating the rule, span and message of one already collected
/// is dropped. Rules that report several distinct problems at the same span
/// (one per missing color tier, for instance) keep all of them because their
/// messages differ.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    seen: HashSet<(String, TextRange, String)>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the diagnostic was a duplicate.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        let key = (
            diagnostic.code.clone(),
            diagnostic.location.range,
            diagnostic.message.clone(),
        );
        if !self.seen.insert(key) {
            log::debug!(
                "Dropping duplicate {} diagnostic at {}:{}",
                diagnostic.code,
                diagnostic.location.line,
                diagnostic.location.column
            );
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in source order, ties broken by rule id then message.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics;
        diagnostics.sort_by(|a, b| {
            (a.location.line, a.location.column, &a.code, &a.message).cmp(&(
                b.location.line,
                b.location.column,
                &b.code,
                &b.message,
            ))
        });
        diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticCollector {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}
