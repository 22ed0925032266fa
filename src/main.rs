use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use similar::{ChangeTag, TextDiff};

use scuff::config::{self, Config};
use scuff::error::Error;
use scuff::linter::{self, Severity};
use scuff::reporter::{self, OutputFormat, ReportOptions};
use scuff::workspace::{self, CancelToken, FileOutcome, FileReport, RunMode};

mod cli;
use cli::{Cli, Commands, FormatArg, SeverityArg};

fn start_dir_for(paths: &[PathBuf]) -> PathBuf {
    let Some(first) = paths.first() else {
        return PathBuf::from(".");
    };
    if first.is_dir() {
        return first.clone();
    }
    match first.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load_config(explicit: Option<&Path>, paths: &[PathBuf]) -> Result<Config, Error> {
    let (cfg, cfg_path) = config::load(explicit, &start_dir_for(paths))?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn report_options(severity: SeverityArg, format: FormatArg) -> ReportOptions {
    ReportOptions {
        min_severity: match severity {
            SeverityArg::Error => Severity::Error,
            SeverityArg::Warning => Severity::Warning,
        },
        format: match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        },
        color: format == FormatArg::Text && use_color(),
    }
}

fn print_diff(file_path: &str, original: &str, fixed: &str, color: bool) {
    let diff = TextDiff::from_lines(original, fixed);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("---");
        }

        println!("Diff in {}:{}:", file_path, group[0].old_range().start + 1);

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", "\x1b[31m"),
                    ChangeTag::Insert => ("+", "\x1b[32m"),
                    ChangeTag::Equal => (" ", ""),
                };

                if color && change.tag() != ChangeTag::Equal {
                    print!("{}{}{}\x1b[0m", style, sign, change.value());
                } else {
                    print!("{}{}", sign, change.value());
                }
                if change.missing_newline() {
                    println!();
                }
            }
        }
    }
}

fn print_report(reports: &[FileReport], options: &ReportOptions) -> Result<(), Error> {
    print!("{}", reporter::render(reports, options)?);
    Ok(())
}

fn run(cli: Cli) -> Result<u8, Error> {
    match cli.command {
        Commands::Lint {
            paths,
            severity,
            format,
            fail_fast,
        } => {
            let cfg = load_config(cli.config.as_deref(), &paths)?;
            let inputs = workspace::collect_inputs(&paths, &cfg)?;
            let cancel = CancelToken::new();
            let reports = workspace::run_batch(&inputs, &cfg, RunMode::Lint, fail_fast, &cancel);

            print_report(&reports, &report_options(severity, format))?;
            Ok(reporter::exit_status(&reports))
        }
        Commands::Fix {
            paths,
            check,
            severity,
            format,
        } => {
            let cfg = load_config(cli.config.as_deref(), &paths)?;
            let inputs = workspace::collect_inputs(&paths, &cfg)?;
            let cancel = CancelToken::new();
            let mode = RunMode::Fix { write: !check };
            let reports = workspace::run_batch(&inputs, &cfg, mode, false, &cancel);
            let options = report_options(severity, format);

            let mut would_change = false;
            for report in &reports {
                let FileOutcome::Checked(result) = &report.outcome else {
                    continue;
                };
                let Some(summary) = &result.fix else {
                    continue;
                };
                if !summary.changed() {
                    continue;
                }
                would_change = true;
                if check && options.format == OutputFormat::Text {
                    let name = report.path.display().to_string();
                    print_diff(&name, &summary.original, &summary.output, options.color);
                } else if !check && options.format == OutputFormat::Text {
                    println!(
                        "Fixed {} ({} fix(es))",
                        report.path.display(),
                        summary.applied
                    );
                }
            }

            print_report(&reports, &options)?;
            let status = reporter::exit_status(&reports);
            if check && would_change {
                return Ok(1);
            }
            Ok(status)
        }
        Commands::Parse { file } => {
            let paths = [file];
            let cfg = load_config(cli.config.as_deref(), &paths)?;
            let inputs = workspace::collect_inputs(&paths, &cfg)?;
            let Some(input) = inputs.first() else {
                return Ok(1);
            };

            let source = fs::read_to_string(&input.path)?.replace("\r\n", "\n");
            match scuff::parse(&source, input.syntax) {
                Ok(tree) => {
                    println!("{:#?}", tree);
                    Ok(0)
                }
                Err(err) => {
                    eprintln!(
                        "error[parse-error]: {} at {}:{}:{}",
                        err.message,
                        input.path.display(),
                        err.line,
                        err.column
                    );
                    Ok(1)
                }
            }
        }
        Commands::Rules => {
            for rule in linter::default_registry().rules() {
                let syntaxes: Vec<&str> = rule.syntaxes().iter().map(|s| s.name()).collect();
                println!(
                    "{:<26} {:<8} {:<8} {}",
                    rule.name(),
                    rule.default_severity(),
                    if rule.fixable() { "fixable" } else { "-" },
                    syntaxes.join(",")
                );
            }
            Ok(0)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(Error::Config(err)) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
