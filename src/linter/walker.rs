use std::any::Any;
use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use scuff_parser::{StyleNode, Syntax};

use crate::config::Config;
use crate::linter::diagnostics::{Diagnostic, Location};
use crate::linter::rules::{NestingContext, Rule, RuleContext};

struct Frame<'a> {
    node: &'a StyleNode,
    parent: Option<&'a StyleNode>,
    siblings: &'a [StyleNode],
    index: usize,
    nesting: NestingContext,
}

/// Pre-order traversal of a stylesheet that runs the applicable rules on
/// every node and yields their diagnostics lazily, in visiting order.
pub struct Walker<'a> {
    rules: &'a [&'a dyn Rule],
    source: &'a str,
    syntax: Syntax,
    path: Option<&'a Path>,
    config: &'a Config,
    stack: Vec<Frame<'a>>,
    pending: VecDeque<Diagnostic>,
}

impl<'a> Walker<'a> {
    pub fn new(
        root: &'a StyleNode,
        rules: &'a [&'a dyn Rule],
        source: &'a str,
        syntax: Syntax,
        path: Option<&'a Path>,
        config: &'a Config,
    ) -> Self {
        let root_frame = Frame {
            node: root,
            parent: None,
            siblings: std::slice::from_ref(root),
            index: 0,
            nesting: NestingContext::default(),
        };

        Self {
            rules,
            source,
            syntax,
            path,
            config,
            stack: vec![root_frame],
            pending: VecDeque::new(),
        }
    }

    fn visit(&mut self, frame: Frame<'a>) {
        let cx = RuleContext {
            source: self.source,
            syntax: self.syntax,
            config: self.config,
            path: self.path,
            nesting: frame.nesting,
            parent: frame.parent,
            siblings: frame.siblings,
            sibling_index: frame.index,
        };

        let kind = frame.node.kind();
        for rule in self.rules {
            if rule.applies_to(kind, self.syntax) {
                let diagnostics = run_check(*rule, frame.node, &cx);
                self.pending.extend(diagnostics);
            }
        }

        let children = frame.node.children();
        if children.is_empty() {
            return;
        }

        let nesting = frame.nesting.enter(frame.node, self.source);
        for (index, _) in children.iter().enumerate().rev() {
            self.stack.push(Frame {
                node: &children[index],
                parent: Some(frame.node),
                siblings: children,
                index,
                nesting,
            });
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        loop {
            if let Some(diagnostic) = self.pending.pop_front() {
                return Some(diagnostic);
            }
            let frame = self.stack.pop()?;
            self.visit(frame);
        }
    }
}

/// Run one rule on one node. A rule that fails or panics yields a single
/// error diagnostic carrying its id instead of ending the walk.
fn run_check(rule: &dyn Rule, node: &StyleNode, cx: &RuleContext<'_>) -> Vec<Diagnostic> {
    let outcome = catch_unwind(AssertUnwindSafe(|| rule.check(node, cx)));

    let reason = match outcome {
        Ok(Ok(diagnostics)) => return diagnostics,
        Ok(Err(err)) => err.message,
        Err(payload) => panic_message(payload.as_ref()),
    };

    log::warn!("Rule {} failed: {}", rule.name(), reason);
    vec![Diagnostic::error(
        Location::from_range(node.range(), cx.source),
        rule.name(),
        format!("internal error in rule `{}`: {}", rule.name(), reason),
    )]
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}
