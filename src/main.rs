mod config;
mod contexts;
mod error;
mod options;
mod plan;
mod render;
mod resolve;
mod templates;

use crate::config::Catalog;
use crate::error::ConfigureError;
use crate::options::{Configuration, parse_options};
use crate::plan::{BuildPlan, build_plan};
use crate::render::{render_makefile, render_usage, write_makefile};
use crate::resolve::resolve;
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error, info, warn};

/// Generate the Makefile for the kaplar server.
#[derive(Parser)]
#[command(version, about, disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Where to write the generated Makefile
    #[arg(long, default_value = "Makefile")]
    makefile: PathBuf,
    /// Catalog file replacing the built-in unit and header tables
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print the Makefile instead of writing it
    #[arg(long)]
    dry_run: bool,
    /// Print the resolved build plan as JSON
    #[arg(long)]
    print_plan: bool,
    /// Log resolved settings and plan details
    #[arg(long)]
    verbose: bool,
    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,
    /// Build options such as `-linux -debug -o kaplar`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTION")]
    options: Vec<String>,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    configuration: &'a Configuration,
    plan: &'a BuildPlan,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ConfigureError>() {
            Some(ConfigureError::UnknownOption(token)) => {
                warn!("Invalid option used: \"{}\"", token);
                print_usage();
                ExitCode::from(2)
            }
            Some(cause) => {
                error!("{:#}", err);
                ExitCode::from(cause.exit_code())
            }
            None => {
                error!("{:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn print_usage() {
    let program = env!("CARGO_PKG_NAME");
    match render_usage(program) {
        Ok(usage) => eprint!("{}", usage),
        Err(err) => error!("{}", err),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = parse_options(&cli.options)?;

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };

    let settings = resolve(&config, &catalog)?;
    debug!(
        "Resolved {} for {} ({:?}, {:?} endian)",
        settings.compiler,
        config.platform.name(),
        config.profile,
        config.byte_order
    );

    let plan = build_plan(&config, &catalog, settings);
    let content = render_makefile(&plan)?;

    if cli.print_plan {
        let report = PlanReport { configuration: &config, plan: &plan };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if cli.dry_run {
        print!("{}", content);
        return Ok(());
    }

    write_makefile(&cli.makefile, &content)
        .with_context(|| format!("Failed to write {}", cli.makefile.display()))?;
    info!("Generated {}", cli.makefile.display());
    Ok(())
}
