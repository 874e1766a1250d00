//! # fire-params
//!
//! CLI tool for generating Rust and C++ parameter constants from YAML/JSON
//! parameter documents.
//!
//! ## Usage
//!
//! ```bash
//! # Generate every configured variant
//! fire-params generate params/vehicle.yaml
//!
//! # Generate into a specific directory, with self-checks
//! fire-params generate params/vehicle.yaml --output ./generated --self-check
//!
//! # Dry run to preview the artifacts
//! fire-params generate params/vehicle.yaml --dry-run
//!
//! # Validate a document and write its canonical JSON form
//! fire-params validate params/vehicle.yaml --emit-json vehicle.params
//!
//! # Fail (exit code 2) when generated artifacts are out of date or the
//! # parameters are invalid
//! fire-params check params/vehicle.yaml
//!
//! # Skip variants with illegal identifiers instead of failing the run
//! fire-params generate params/vehicle.yaml --isolate-naming-failures
//!
//! # Initialize configuration
//! fire-params init
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use fire_params_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::CliError,
    generator::ParamsGenerator,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "fire-params")]
#[command(author, version, about = "Generate Rust and C++ parameter constants from YAML/JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every configured variant from a parameter document
    Generate {
        /// Parameter document (.yaml, .yml, .json or .params)
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the document namespace (dot-separated)
        #[arg(long)]
        namespace: Option<String>,

        /// Preview artifacts without writing files
        #[arg(long)]
        dry_run: bool,

        /// Append value-asserting self-checks to every artifact
        #[arg(long)]
        self_check: bool,

        /// Render variants one after another
        #[arg(long)]
        sequential: bool,

        /// Skip a variant with an illegal identifier instead of failing
        #[arg(long)]
        isolate_naming_failures: bool,
    },

    /// Validate a parameter document
    Validate {
        /// Parameter document (.yaml, .yml, .json or .params)
        input: PathBuf,

        /// Write the canonical JSON form of the document to this path
        #[arg(long, value_name = "OUT")]
        emit_json: Option<PathBuf>,

        /// Override the document namespace (dot-separated)
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Check that generated artifacts are up-to-date
    Check {
        /// Parameter document (.yaml, .yml, .json or .params)
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the document namespace (dot-separated)
        #[arg(long)]
        namespace: Option<String>,

        /// Skip a variant with an illegal identifier instead of failing
        #[arg(long)]
        isolate_naming_failures: bool,
    },

    /// Initialize a new fire-params configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,fire_params=info,fire_params_cli=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            input,
            config,
            output,
            namespace,
            dry_run,
            self_check,
            sequential,
            isolate_naming_failures,
        } => {
            let args = CliArgs {
                output,
                self_check: self_check.then_some(true),
                parallel: sequential.then_some(false),
                isolate_naming_failures: isolate_naming_failures.then_some(true),
            };
            cmd_generate(&input, config.as_deref(), &args, namespace.as_deref(), dry_run)
        }

        Commands::Validate {
            input,
            emit_json,
            namespace,
        } => cmd_validate(&input, emit_json.as_deref(), namespace.as_deref()),

        Commands::Check {
            input,
            config,
            output,
            namespace,
            isolate_naming_failures,
        } => {
            let args = CliArgs {
                output,
                isolate_naming_failures: isolate_naming_failures.then_some(true),
                ..Default::default()
            };
            cmd_check(&input, config.as_deref(), &args, namespace.as_deref())
        }

        Commands::Init { output, force } => cmd_init(&output, force),
    }
}

fn load_config(path: Option<&Path>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::load(path)?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Generate command implementation.
fn cmd_generate(
    input: &Path,
    config_path: Option<&Path>,
    args: &CliArgs,
    namespace: Option<&str>,
    dry_run: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path, args)?;

    println!("{} {}", "Loading".cyan(), input.display());
    let generator = ParamsGenerator::load(input, namespace)?;
    println!(
        "  Found {} parameter(s)",
        generator.set().len().to_string().green()
    );

    println!(
        "{}",
        format!("Rendering {} variant(s)...", config.variants.len()).cyan()
    );
    let writer = FileWriter::new(&config.output.dir, dry_run);
    let run = generator.write(&config, &writer)?;

    for skipped in &run.skipped {
        println!(
            "{} skipped variant '{}': {}",
            "Warning:".yellow(),
            skipped.variant,
            skipped.error
        );
    }

    for result in writer.take_results() {
        match result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::Unchanged { path } => {
                println!("{} Unchanged {}", "✓".green(), path.display());
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(
    input: &Path,
    emit_json: Option<&Path>,
    namespace: Option<&str>,
) -> Result<(), CliError> {
    println!("{} {}", "Validating".cyan(), input.display());

    let generator = ParamsGenerator::load(input, namespace)?;
    generator.validate()?;

    println!(
        "{} {} parameter(s) are valid",
        "✓".green(),
        generator.set().len()
    );

    if let Some(path) = emit_json {
        generator.emit_json(path)?;
        println!("{} Written {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(
    input: &Path,
    config_path: Option<&Path>,
    args: &CliArgs,
    namespace: Option<&str>,
) -> Result<(), CliError> {
    println!("{}", "Checking generated artifacts...".cyan());

    let config = load_config(config_path, args)?;
    let generator = ParamsGenerator::load(input, namespace)?;
    let stale = generator.stale(&config)?;

    if stale.is_empty() {
        println!("{} Artifacts are up-to-date", "✓".green());
        Ok(())
    } else {
        for path in &stale {
            println!("{} {}", "✗".red(), path.display());
        }
        println!("  Run 'fire-params generate' to update");
        Err(CliError::Stale { files: stale })
    }
}

/// Init command implementation.
fn cmd_init(output: &Path, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        return Err(CliError::AlreadyExists {
            path: output.to_path_buf(),
        });
    }

    std::fs::write(output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
