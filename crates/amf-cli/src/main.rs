//! amf - ACES Metadata File compilation CLI
//!
//! Compiles AMF documents into color configurations and reports what was
//! assembled.

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "amf")]
#[command(author, version, about = "ACES Metadata File compiler")]
#[command(long_about = "
Compiles ACES Metadata Files (AMF) into self-consistent color
configurations: color spaces, looks, display/views, named transforms,
and roles, resolved against a reference configuration.

Examples:
  amf compile clip.amf                  # Compile and print the summary
  amf compile clip.amf -v               # Also list what was registered
  amf compile clip.amf -r studio.ocio   # Use an external reference config
  amf validate clip.amf                 # Compile and validate the result
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an AMF document and print the summary
    #[command(visible_alias = "c")]
    Compile(CompileArgs),

    /// Compile an AMF document and validate the resulting configuration
    #[command(visible_alias = "v")]
    Validate(CompileArgs),
}

#[derive(Args)]
struct CompileArgs {
    /// AMF document to compile
    file: PathBuf,

    /// Reference configuration file (defaults to the built-in studio config)
    #[arg(short, long)]
    reference: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile(args) => cmd_compile(&args, cli.verbose),
        Commands::Validate(args) => cmd_validate(&args),
    }
}

fn load_reference(args: &CompileArgs) -> Result<amf_config::Config> {
    match &args.reference {
        Some(path) => amf_config::Config::from_file(path)
            .with_context(|| format!("loading reference config {}", path.display())),
        None => Ok(amf_config::builtin::studio_config()),
    }
}

fn compile(args: &CompileArgs) -> Result<(amf_config::Config, amf_compile::AmfInfo)> {
    let reference = load_reference(args)?;
    debug!(reference = reference.name(), "reference configuration loaded");

    amf_compile::compile_with_reference(&args.file, &reference)
        .with_context(|| format!("compiling {}", args.file.display()))
}

fn cmd_compile(args: &CompileArgs, verbose: bool) -> Result<()> {
    let (config, info) = compile(args)?;

    println!("clip identifier : {}", info.clip_identifier);
    println!("input space     : {}", info.input_colorspace);
    println!("clip space      : {}", info.clip_colorspace);
    println!("active display  : {}", info.display_name);
    println!("active view     : {}", info.view_name);
    println!("looks applied   : {}", info.looks_applied);

    if verbose {
        println!("\ncolor spaces:");
        for cs in config.colorspaces() {
            println!("  {}", cs.name());
        }
        println!("\nlooks:");
        for name in config.looks().names() {
            println!("  {name}");
        }
        println!("\nnamed transforms:");
        for nt in config.named_transforms() {
            println!("  {}", nt.name);
        }
        println!("\nroles:");
        for (role, cs) in config.roles().iter() {
            println!("  {role} -> {cs}");
        }
    }

    Ok(())
}

fn cmd_validate(args: &CompileArgs) -> Result<()> {
    let (config, info) = compile(args)?;

    let issues = amf_config::validate::check(&config);
    for issue in &issues {
        println!("{}: {}", issue.severity, issue.message);
    }

    if amf_config::validate::has_errors(&issues) {
        anyhow::bail!("configuration for '{}' failed validation", info.clip_identifier);
    }
    println!("OK: {} validates", info.clip_identifier);
    Ok(())
}
