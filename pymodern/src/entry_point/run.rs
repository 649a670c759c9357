use crate::auditor::Auditor;
use crate::cli::{Cli, OutputFormat};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::entry_point::config::setup_configuration;
use crate::entry_point::paths::{check_paths_exist, resolve_audit_context, validate_path_args};

/// Runs the auditor with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if writing output fails; every audit-level failure is
/// reported through the returned exit code instead.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run pymodern with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let start_time = std::time::Instant::now();

    let mut program_args = vec!["pymodern".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(2);
                }
            }
        }
    };

    if cli.list_rules {
        print_rule_catalog(writer)?;
        return Ok(0);
    }

    if let Err(code) = validate_path_args(&cli) {
        return Ok(code);
    }
    let (effective_paths, audit_root) = resolve_audit_context(&cli);
    if let Err(code) = check_paths_exist(&effective_paths) {
        return Ok(code);
    }

    let app_config = match setup_configuration(&effective_paths, &cli) {
        Ok(app_config) => app_config,
        Err(err) => {
            eprintln!("{} {err}", "Configuration error:".red().bold());
            return Ok(2);
        }
    };

    if cli.verbose && !cli.is_structured() {
        eprintln!("[VERBOSE] pymodern v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        eprintln!(
            "[VERBOSE] Enabled rules: {}",
            app_config
                .registry
                .descriptors()
                .iter()
                .map(|d| d.id)
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(ref path) = app_config.config.config_file_path {
            eprintln!("[VERBOSE] Configuration file: {}", path.display());
        }
        eprintln!();
    }

    // Ctrl-C flips the shared cancel flag; a second registration (tests call
    // this entry point repeatedly) is harmless and ignored.
    ctrlc::set_handler(|| {
        crate::CANCELLED.store(true, std::sync::atomic::Ordering::Relaxed);
    })
    .ok();

    let progress_bar = if cli.is_structured() || cli.quiet || cli.no_progress {
        None
    } else {
        Some(std::sync::Arc::new(crate::output::create_progress_bar(0)))
    };

    let auditor = Auditor::new(app_config.registry, app_config.config)
        .with_root(audit_root.clone())
        .with_verbose(cli.verbose)
        .with_extensions(app_config.extensions)
        .with_excludes(app_config.exclude_folders)
        .with_includes(app_config.include_folders)
        .with_exclude_paths(app_config.exclude_paths)
        .with_progress(progress_bar);

    let report = match auditor.audit(&effective_paths) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{} {err}", "Configuration error:".red().bold());
            return Ok(2);
        }
    };

    match cli.effective_format() {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Github => {
            crate::report::github::print_github_with_root(writer, &report, Some(&audit_root))?;
        }
        OutputFormat::Grouped => {
            crate::output::print_report_grouped(writer, &report)?;
            print_footer(writer, &report, start_time)?;
        }
        OutputFormat::Text => {
            if cli.quiet {
                crate::output::print_report_quiet(writer, &report)?;
            } else {
                crate::output::print_report(writer, &report)?;
                print_footer(writer, &report, start_time)?;
            }
        }
    }

    Ok(i32::from(report.has_findings()))
}

fn print_footer<W: std::io::Write>(
    writer: &mut W,
    report: &crate::auditor::AuditReport,
    start_time: std::time::Instant,
) -> Result<()> {
    writeln!(
        writer,
        "\n[SUMMARY] {} outdated idioms, {} parse errors, {} files scanned",
        report.summary.total_findings - report.summary.parse_errors_count,
        report.summary.parse_errors_count,
        report.summary.total_files
    )?;
    writeln!(
        writer,
        "{} in {:.2}s",
        "Audit completed".green().bold(),
        start_time.elapsed().as_secs_f64()
    )?;
    Ok(())
}

fn print_rule_catalog<W: std::io::Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", "Builtin rules".bold())?;
    for descriptor in crate::registry::all_rule_descriptors() {
        writeln!(
            writer,
            "  {}  {:<28} [{}/{}]\n        {}\n        -> {}",
            descriptor.id,
            descriptor.name,
            descriptor.category.as_str(),
            descriptor.default_severity.as_str(),
            descriptor.summary,
            descriptor.replacement
        )?;
    }
    Ok(())
}
