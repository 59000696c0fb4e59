use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use recipe_compiler::{
    AnthropicClient, AnthropicConfig, ExternalCommand, Generator, OpencodeConfig,
    OpencodeGenerator, PipelineConfig, RunReport, ValidatorConfig, compile_recipe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Shell out to the opencode CLI
    Opencode,
    /// Call the Anthropic Messages API (needs ANTHROPIC_API_KEY)
    Anthropic,
}

#[derive(Parser)]
#[command(name = "compile_recipe")]
#[command(author, version, about = "Iteratively compile a recipe into Roux YAML format", long_about = None)]
#[command(
    after_help = "The validator's output and the success message are printed on stdout. \
Generator and validation failures are printed on stderr, together with log output."
)]
struct Cli {
    /// Path to raw recipe text or partial YAML
    input_file: PathBuf,

    /// Output YAML path
    #[arg(short, long, default_value = "recipe.yml")]
    output: PathBuf,

    /// Generator backend
    #[arg(long, value_enum, default_value_t = Backend::Opencode)]
    generator: Backend,

    /// Program used to launch opencode
    #[arg(long, default_value = "opencode")]
    generator_cmd: String,

    /// Model for the anthropic backend
    #[arg(long)]
    model: Option<String>,

    /// Validator program [default: mix]
    #[arg(long)]
    validator: Option<String>,

    /// Argument passed to the validator before the output path (repeatable) [default: roux.validate]
    #[arg(long = "validator-arg", allow_hyphen_values = true)]
    validator_args: Vec<String>,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig {
        validator: ValidatorConfig::from_parts(cli.validator, cli.validator_args),
    };
    let report_path = cli.report.as_deref();

    match cli.generator {
        Backend::Opencode => {
            if let Some(model) = &cli.model {
                warn!("--model {} has no effect with the opencode generator", model);
            }
            let generator = OpencodeGenerator::new(OpencodeConfig {
                command: ExternalCommand::new(cli.generator_cmd),
            });
            compile_with(&generator, &cli.input_file, &cli.output, &config, report_path).await
        }
        Backend::Anthropic => {
            let mut api_config = match AnthropicConfig::from_env() {
                Ok(api_config) => api_config,
                Err(e) => {
                    if let Some(path) = report_path {
                        let mut report = RunReport::new(&cli.input_file, &cli.output, "anthropic");
                        report.finish("error");
                        write_report(&report, path);
                    }
                    return Err(e);
                }
            };
            if let Some(model) = cli.model {
                api_config = api_config.with_model(model);
            }
            info!("Using Anthropic model {}", api_config.model);
            let generator = AnthropicClient::new(api_config);
            compile_with(&generator, &cli.input_file, &cli.output, &config, report_path).await
        }
    }
}

async fn compile_with<G: Generator>(
    generator: &G,
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    report_path: Option<&Path>,
) -> Result<()> {
    let mut report = RunReport::new(input, output, generator.name());
    let result = compile_recipe(generator, input, output, config, &mut report).await;

    if let Some(path) = report_path {
        write_report(&report, path);
    }

    result?;
    println!("Successfully compiled to {}", output.display());
    Ok(())
}

fn write_report(report: &RunReport, path: &Path) {
    match report.write_json(path) {
        Ok(()) => info!("Run report written to {:?}", path),
        Err(e) => warn!("Could not write run report to {:?}: {:#}", path, e),
    }
}
