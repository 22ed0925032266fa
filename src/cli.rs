use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scuff")]
#[command(author, version)]
#[command(about = "A linter and autofixer for CSS and SCSS style conventions")]
#[command(
    long_about = "Scuff checks CSS and SCSS stylesheets against a house style: formatting \
    (indentation, braces, colons, blank lines), selector conventions (IDs, nesting depth, \
    element-qualified classes), declaration order, variable naming and color palette \
    organization. Most formatting problems can be fixed automatically."
)]
#[command(after_help = "\
EXAMPLES:

    # Lint a directory
    scuff lint styles/

    # Only report errors, as JSON
    scuff lint --severity error --format json styles/

    # Fix files in place
    scuff fix styles/

    # Show what fix would change (exit code 1 if anything would)
    scuff fix --check styles/main.scss

    # Inspect the parsed tree
    scuff parse styles/main.scss

CONFIGURATION:

Scuff looks for configuration files in this order:
  1. Explicit --config path
  2. .scuff.toml or scuff.toml in the first input's directory and its parents
  3. ~/.config/scuff/config.toml (XDG)
  4. Built-in defaults

Example .scuff.toml:

    max_nesting_depth = 3
    border_zero = \"none\"
    exclude = [\"**/vendor/**\"]

    [rules]
    no-id-selectors = \"error\"
    declaration-order = \"off\"

For more information, visit: https://github.com/scuff-lint/scuff")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, scuff will \
        search for .scuff.toml or scuff.toml next to the first input and in its parents, \
        then fall back to ~/.config/scuff/config.toml."
    )]
    pub config: Option<PathBuf>,
}

/// Lowest severity to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check stylesheets and report problems
    #[command(
        long_about = "Check CSS and SCSS files against scuff's rules and report every problem \
        found. Files are never modified. Directories are searched recursively for .css and \
        .scss files, honoring .gitignore and the `exclude` setting."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Lint two files
    scuff lint main.scss _colors.scss

    # Stop after the first file with errors
    scuff lint --fail-fast styles/

EXIT STATUS:

  0  no error-severity problems
  1  errors remain, or a file could not be read or parsed
  2  invalid configuration or input paths")]
    Lint {
        /// Files or directories to lint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = SeverityArg::Warning)]
        #[arg(help = "Minimum severity to report")]
        severity: SeverityArg,

        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        #[arg(help = "Output format")]
        format: FormatArg,

        #[arg(long)]
        #[arg(help = "Skip remaining files once one has errors")]
        fail_fast: bool,
    },
    /// Apply automatic fixes in place
    #[command(
        long_about = "Apply the fixes of all fixable rules and write the result back to each \
        file. Problems without a fix are reported afterwards. Use --check to preview the \
        changes as a diff instead."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Fix in place
    scuff fix styles/

    # Preview fixes (exit code 1 if any would apply)
    scuff fix --check styles/main.scss")]
    Fix {
        /// Files or directories to fix
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long)]
        #[arg(help = "Show a diff instead of writing (exit code 1 if files would change)")]
        check: bool,

        #[arg(long, value_enum, default_value_t = SeverityArg::Warning)]
        #[arg(help = "Minimum severity to report")]
        severity: SeverityArg,

        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        #[arg(help = "Output format for remaining problems")]
        format: FormatArg,
    },
    /// Parse and display the stylesheet tree for debugging
    #[command(
        long_about = "Parse a stylesheet and print the tree scuff's rules operate on: rules, \
        at-rules, declarations, comments and Sass variables with their byte ranges."
    )]
    Parse {
        /// Input file
        #[arg(help = "Input file path (.css or .scss)")]
        file: PathBuf,
    },
    /// List the available rules
    Rules,
}
