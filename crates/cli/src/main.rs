//! opgen CLI
//!
//! Command-line interface for generating client operation code from API
//! model documents.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use opgen_common::GeneratorConfig;
use opgen_generator::OperationGenerator;
use opgen_parser::{load_model, ApiModel, ModuleResolver};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "opgen")]
#[command(version, about = "Generate client operation code from API models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Settings shared by commands that load a model
#[derive(clap::Args, Debug, Default)]
struct ModelArgs {
    /// Path to the API model document (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Generator configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path generated code uses to reach the runtime crate
    #[arg(long)]
    runtime_crate: Option<String>,

    /// Module that holds the input/output types
    #[arg(long)]
    types_module: Option<String>,

    /// Receiver field holding the service handle
    #[arg(long)]
    service_field: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate operation code for an API model
    #[command(after_help = "EXAMPLES:\n  \
        # Print every operation of a model\n  \
        opgen generate --model s3.json\n\n  \
        # Write one operation to a file\n  \
        opgen generate --model s3.json --operation ListObjects --output src/list_objects.rs\n\n  \
        # Use a custom runtime path and types module\n  \
        opgen generate --model s3.json --runtime-crate crate::runtime --types-module crate::model")]
    Generate {
        #[command(flatten)]
        model: ModelArgs,

        /// Only generate this operation (by exported name)
        #[arg(long)]
        operation: Option<String>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the auto-generated notice
        #[arg(long)]
        no_header: bool,
    },

    /// Show the operations of an API model and what will be generated for each
    Inspect {
        #[command(flatten)]
        model: ModelArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            model,
            operation,
            output,
            no_header,
        } => {
            let mut config = load_config(&model)?;
            if no_header {
                config.header = false;
            }
            generate_command(
                &model.model,
                config,
                operation.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Inspect { model } => {
            let config = load_config(&model)?;
            inspect_command(&model.model, config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(args: &ModelArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    apply_overrides(&mut config, args);
    config.validate().context("Invalid generator configuration")?;
    debug!(?config, "generator configuration");
    Ok(config)
}

fn apply_overrides(config: &mut GeneratorConfig, args: &ModelArgs) {
    if let Some(runtime_crate) = &args.runtime_crate {
        config.runtime_crate = runtime_crate.clone();
    }
    if let Some(types_module) = &args.types_module {
        config.types_module = types_module.clone();
    }
    if let Some(service_field) = &args.service_field {
        config.service_field = service_field.clone();
    }
}

fn load(model_path: &Path, config: &GeneratorConfig) -> Result<ApiModel> {
    eprintln!("{} Loading model: {}", "→".cyan(), model_path.display());
    let resolver = ModuleResolver::new(&config.types_module);
    let model = load_model(model_path, &resolver)
        .with_context(|| format!("Failed to load model {}", model_path.display()))?;
    eprintln!(
        "{} Loaded {} operations for {}",
        "✓".green(),
        model.operations.len(),
        model.api.struct_name().yellow()
    );
    Ok(model)
}

fn generate_command(
    model_path: &Path,
    config: GeneratorConfig,
    operation: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let model = load(model_path, &config)?;
    let generator = OperationGenerator::new(config).context("Failed to create generator")?;

    let operations = match operation {
        Some(name) => {
            let op = model
                .operation(name)
                .with_context(|| format!("Unknown operation: {}", name))?;
            vec![op.clone()]
        }
        None => model.operations.clone(),
    };

    eprintln!(
        "{} Generating {} operations...",
        "→".cyan(),
        operations.len()
    );

    match output {
        Some(path) => {
            generator
                .generate_to_file(&model.api, &operations, path)
                .context("Failed to generate operations")?;
            eprintln!("\n{}", "✓ Generation complete!".green().bold());
            eprintln!("  📄 {}", path.display());
        }
        None => {
            let source = generator
                .generate_api(&model.api, &operations)
                .context("Failed to generate operations")?;
            println!("{}", source);
        }
    }

    Ok(())
}

fn inspect_command(model_path: &Path, config: GeneratorConfig) -> Result<()> {
    let model = load(model_path, &config)?;
    let generator = OperationGenerator::new(config).context("Failed to create generator")?;

    println!("\n{}", "Operations:".bold());
    for op in &model.operations {
        let plan = generator.plan(&model.api, op);

        let mut flags = Vec::new();
        if plan.input.is_some() {
            flags.push("input");
        }
        if plan.output.is_some() {
            flags.push("output");
        }
        if plan.http_method.is_some() {
            flags.push("method");
        }
        if plan.http_path.is_some() {
            flags.push("path");
        }
        if plan.has_pages() {
            flags.push("pages");
        }

        println!("  • {} ({})", op.exported_name.cyan(), flags.join(", "));
        println!(
            "    {} {}",
            op.http.method.as_str().yellow(),
            op.http.request_uri
        );
        println!("    fn {} / {}", plan.call_fn, plan.request_fn);
    }

    Ok(())
}
