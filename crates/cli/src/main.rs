//! gc-validator-gen CLI
//!
//! Command-line interface for generating MongoDB validators from the
//! Genesys Cloud platform API spec.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use gc_validator_gen_common::ValidatorDocument;
use gc_validator_gen_loader::{LoaderConfig, Region, SpecLoader};
use gc_validator_gen_parser::SwaggerParser;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gc-validator-gen")]
#[command(version, about = "Generate MongoDB $jsonSchema validators from Genesys Cloud platform API definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported Genesys Cloud regions
    Regions,

    /// Download the platform API spec of a region
    #[command(after_help = "EXAMPLES:\n  \
        gc-validator-gen fetch --region us-east-1 --output publicapi-v2-latest.json")]
    Fetch {
        /// Genesys Cloud region (e.g. us-east-1)
        #[arg(short, long, env = "GC_REGION")]
        region: String,

        /// HTTP timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the definitions of a spec
    Definitions {
        #[command(flatten)]
        source: SpecSource,
    },

    /// Convert a single definition to a validator
    #[command(after_help = "EXAMPLES:\n  \
        # From a saved spec\n  \
        gc-validator-gen convert --spec publicapi-v2-latest.json --definition Queue\n\n  \
        # Straight from the cloud\n  \
        gc-validator-gen convert --region eu-west-1 --definition Queue --output queue.json")]
    Convert {
        #[command(flatten)]
        source: SpecSource,

        /// Definition name (e.g. Queue)
        #[arg(short, long)]
        definition: String,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert every definition, one file per definition
    #[command(after_help = "EXAMPLES:\n  \
        gc-validator-gen convert-all --spec publicapi-v2-latest.json --output ./validators\n\n  \
        # Only the definitions listed in a JSON array\n  \
        gc-validator-gen convert-all --spec publicapi-v2-latest.json --names names.json --output ./validators")]
    ConvertAll {
        #[command(flatten)]
        source: SpecSource,

        /// JSON file holding an array of definition names to convert
        #[arg(long)]
        names: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "./validators")]
        output: PathBuf,
    },
}

/// Where the spec comes from: a local file, or a region's API server
#[derive(Args)]
struct SpecSource {
    /// Path to a saved spec file
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Genesys Cloud region to download the spec from
    #[arg(short, long, env = "GC_REGION")]
    region: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Regions => regions_command()?,
        Commands::Fetch {
            region,
            timeout_secs,
            output,
        } => fetch_command(&region, timeout_secs, output.as_path())?,
        Commands::Definitions { source } => definitions_command(&source, cli.verbose)?,
        Commands::Convert {
            source,
            definition,
            output,
            compact,
        } => convert_command(&source, &definition, output.as_deref(), compact)?,
        Commands::ConvertAll {
            source,
            names,
            output,
        } => convert_all_command(&source, names.as_deref(), output.as_path())?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn regions_command() -> Result<()> {
    println!("{}", "Genesys Cloud regions:".bold());
    for region in Region::ALL {
        let urls = region.urls()?;
        println!("  • {:<16} {}", region.code().cyan(), urls.api);
    }
    Ok(())
}

fn fetch_command(region: &str, timeout_secs: u64, output: &Path) -> Result<()> {
    let spec = download_spec(region, timeout_secs)?;

    let content = serde_json::to_string_pretty(&spec).context("Failed to serialize spec")?;
    fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Saved {} definitions to {}",
        "✓".green(),
        count_definitions(&spec),
        output.display()
    );
    Ok(())
}

fn definitions_command(source: &SpecSource, verbose: bool) -> Result<()> {
    let parser = load_parser(source)?;
    let names = parser.definition_names();

    for name in &names {
        println!("{}", name);
    }

    if verbose {
        eprintln!("{} {} definitions", "→".cyan(), names.len());
    }
    Ok(())
}

fn convert_command(
    source: &SpecSource,
    definition: &str,
    output: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let parser = load_parser(source)?;

    let validator = parser
        .convert(definition)
        .with_context(|| format!("Failed to convert definition {}", definition))?;
    let rendered = render(&validator, compact)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote validator for {} to {}",
                "✓".green(),
                definition.yellow(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn convert_all_command(source: &SpecSource, names: Option<&Path>, output: &Path) -> Result<()> {
    let parser = load_parser(source)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let results: Vec<(String, _)> = match names {
        Some(names_path) => read_names(names_path)?
            .iter()
            .map(|name| (describe_name(name), parser.convert_value_name(name)))
            .collect(),
        None => parser.convert_all(),
    };

    println!(
        "{} Converting {} definitions into {}",
        "→".cyan(),
        results.len(),
        output.display()
    );

    let mut failures = 0usize;
    for (name, result) in &results {
        match result {
            Ok(validator) => match write_validator(output, name, validator) {
                Ok(path) => {
                    debug!(definition = %name, path = %path.display(), "wrote validator");
                },
                Err(e) => {
                    failures += 1;
                    eprintln!("  {} {}: {:#}", "✗".red(), name.yellow(), e);
                },
            },
            Err(e) => {
                failures += 1;
                eprintln!("  {} {}: {}", "✗".red(), name.yellow(), e);
            }
        }
    }

    let converted = results.len() - failures;
    if failures > 0 {
        bail!(
            "{} of {} definitions failed to convert",
            failures,
            results.len()
        );
    }

    println!("\n{}", "✓ Conversion complete!".green().bold());
    println!("  Validators written: {}", converted);
    Ok(())
}

/// Write one validator as `<name>.json` inside `output`
fn write_validator(output: &Path, name: &str, validator: &ValidatorDocument) -> Result<PathBuf> {
    let file_name = validator_file_name(name)
        .with_context(|| format!("Definition name {:?} is not usable as a file name", name))?;
    let path = output.join(file_name);

    fs::write(&path, render(validator, false)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Only plain stems of `[A-Za-z0-9_-]` become file names
fn validator_file_name(name: &str) -> Option<String> {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    plain.then(|| format!("{}.json", name))
}

fn load_parser(source: &SpecSource) -> Result<SwaggerParser> {
    if let Some(ref path) = source.spec {
        println_status(&format!("Reading spec file: {}", path.display()));
        return SwaggerParser::from_file(path).context("Failed to load Swagger spec");
    }

    if let Some(ref region) = source.region {
        let spec = download_spec(region, source.timeout_secs)?;
        return SwaggerParser::from_value(spec).context("Failed to load Swagger spec");
    }

    bail!("Either --spec or --region (or GC_REGION) must be given")
}

fn download_spec(region: &str, timeout_secs: u64) -> Result<Value> {
    let region: Region = region.parse().context("Unknown region")?;
    let config = LoaderConfig::default().with_timeout(Duration::from_secs(timeout_secs));
    let loader = SpecLoader::new(config).context("Failed to set up spec loader")?;

    println_status(&format!(
        "Downloading spec from {}",
        <SpecLoader>::spec_url(region)?
    ));
    loader
        .load(region)
        .with_context(|| format!("Failed to download spec for region {}", region))
}

fn read_names(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read names file {}", path.display()))?;
    let names: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON array", path.display()))?;
    Ok(names)
}

fn describe_name(name: &Value) -> String {
    match name.as_str() {
        Some(s) => s.to_string(),
        None => name.to_string(),
    }
}

fn render(validator: &ValidatorDocument, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(validator)
    } else {
        serde_json::to_string_pretty(validator)
    };
    rendered.context("Failed to serialize validator")
}

fn count_definitions(spec: &Value) -> usize {
    spec.get("definitions")
        .and_then(Value::as_object)
        .map_or(0, |definitions| definitions.len())
}

/// Status lines go to stderr so stdout stays clean for piped JSON
fn println_status(message: &str) {
    eprintln!("{} {}", "→".cyan(), message);
}
