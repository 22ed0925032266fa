//! CLI integration tests for scuff.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (lint, fix, parse, rules)
//! - Exit codes
//! - File I/O operations
//! - Configuration errors

mod common;
mod fix;
mod lint;
mod parse;
