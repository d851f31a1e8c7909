//! CLI entry point for interface generation.
//!
//! Scans a Go source tree for exported methods of one receiver type and
//! writes an interface declaration listing them.

use anyhow::Context;
use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use console::style;
use ifacegen::error::{AssembleError, ExtractError};
use ifacegen::io::{ExitCode, open_sink};
use ifacegen::{Assembler, Extractor, InterfaceStyle, Settings};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Generate an interface from the exported methods of a Go type
#[derive(Parser, Debug)]
#[command(
    name = "ifacegen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate an interface from the exported methods of a Go type",
    after_help = "Examples:\n  ifacegen --struct Store\n  ifacegen --struct Store --root ./internal --package store --out gen/store\n  ifacegen -s Store --style go --inject 'import \"context\"'",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Name of the receiver type
    #[arg(
        short,
        long = "struct",
        value_name = "NAME",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    struct_name: String,

    /// Root directory to scan
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Name of the generated interface (defaults to the struct name)
    #[arg(short, long)]
    interface: Option<String>,

    /// Package name emitted as header
    #[arg(short, long)]
    package: Option<String>,

    /// Raw text placed before the interface; `\n` and `\t` are expanded
    #[arg(long, value_name = "TEXT")]
    inject: Vec<String>,

    /// Output file (stdout when not specified)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Number of files searched through simultaneously (0 = one per CPU)
    #[arg(long, value_name = "N")]
    pool: Option<usize>,

    /// Interface header style
    #[arg(long, value_enum)]
    style: Option<InterfaceStyle>,

    /// Path to custom settings.toml file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write nothing when any file fails to scan
    #[arg(long)]
    strict: bool,

    /// Print extraction statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {e}", style("Configuration error:").red().bold());
            return ExitCode::ConfigError.into();
        }
    };

    init_tracing(cli.verbose || settings.debug);

    match run(&cli, &settings) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            exit_code_for(&e).into()
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<figment::Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    if let Some(pool) = cli.pool {
        settings.extraction.pool_size = pool;
    }
    if let Some(style) = cli.style {
        settings.output.style = style;
    }
    Ok(settings)
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "ifacegen=debug"
    } else {
        "ifacegen=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<ExitCode> {
    let extractor = Extractor::from_settings(settings);
    let extraction = extractor
        .extract(&cli.struct_name, &cli.root)
        .context("Extracting signatures")?;

    if cli.stats {
        extraction.stats.display();
    }

    if let Some(errors) = &extraction.errors {
        eprintln!(
            "{} {} file(s) could not be scanned:\n{errors}",
            style("Warning:").yellow().bold(),
            errors.len()
        );
        if cli.strict {
            return Ok(ExitCode::PartialFailure);
        }
    }

    let interface_name = cli.interface.as_deref().unwrap_or(&cli.struct_name);
    let assembler = Assembler::new(interface_name)
        .with_package(cli.package.as_deref())
        .with_inject(cli.inject.iter().cloned())
        .with_style(settings.output.style);

    let (mut sink, path) =
        open_sink(cli.out.as_deref(), &settings.output).context("Opening output")?;
    assembler
        .render(&extraction.signatures, &mut sink)
        .context("Assembling output")?;
    sink.flush()
        .map_err(AssembleError::from)
        .context("Assembling output")?;

    if let Some(path) = path {
        tracing::info!(
            "wrote {} signatures to {}",
            extraction.signatures.len(),
            path.display()
        );
    }

    Ok(if extraction.is_complete() {
        ExitCode::Success
    } else {
        ExitCode::PartialFailure
    })
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    if let Some(extract_error) = error.downcast_ref::<ExtractError>() {
        for suggestion in extract_error.recovery_suggestions() {
            eprintln!("  hint: {suggestion}");
        }
        return ExitCode::from_error(extract_error);
    }
    if let Some(assemble_error) = error.downcast_ref::<AssembleError>() {
        return ExitCode::from_assemble_error(assemble_error);
    }
    ExitCode::GeneralError
}
