//! # geo-cli
//!
//! `geodata`: validate the raw administrative tables and export them.
//!
//! The human-readable run summary goes to stdout; logs go to stderr. The
//! exit status is 0 only when validation passed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use geo_pipeline::{ExportFormat, Pipeline, PipelineConfig, RunSummary};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geodata")]
#[command(about = "Validate and export Thai administrative area data")]
#[command(version)]
struct Cli {
    /// Data root containing data/raw and data/spec
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log per-file and per-row details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate raw tables against their schemas and each other
    Validate {
        /// Treat warnings as failures
        #[arg(long)]
        fail_on_warn: bool,
    },

    /// Validate, then write formats/<format>/<table>.<ext>
    ExportFormats {
        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        formats: FormatArgs,
    },

    /// Validate, then write api/latest/*.json
    ExportApi {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate, export formats, export API
    Make {
        /// Treat warnings as failures
        #[arg(long)]
        fail_on_warn: bool,

        /// Replace existing output files (the default for make)
        #[arg(long, conflicts_with = "keep_existing")]
        overwrite: bool,

        /// Skip existing output files instead of replacing them
        #[arg(long)]
        keep_existing: bool,

        /// Spaces per JSON indent level; 0 for compact output
        #[arg(long, default_value_t = 2)]
        indent: usize,

        #[command(flatten)]
        formats: FormatArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Replace existing output files
    #[arg(long)]
    overwrite: bool,

    /// Spaces per JSON indent level; 0 for compact output
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

#[derive(Args)]
struct FormatArgs {
    /// Omit CREATE TABLE from SQL exports
    #[arg(long)]
    no_create: bool,

    /// Formats to export, comma separated (default: all)
    #[arg(long = "format", value_delimiter = ',')]
    formats: Vec<ExportFormat>,
}

impl FormatArgs {
    fn apply(self, config: PipelineConfig) -> PipelineConfig {
        let config = config.include_create_table(!self.no_create);
        if self.formats.is_empty() {
            config
        } else {
            config.with_formats(self.formats)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    tracing::debug!(root = %cli.root.display(), "Using data root");
    let base = PipelineConfig::new(cli.root);

    let summary = match cli.command {
        Commands::Validate { fail_on_warn } => {
            Pipeline::new(base.fail_on_warn(fail_on_warn)).validate()?
        }
        Commands::ExportFormats { output, formats } => {
            let config = formats.apply(base.overwrite(output.overwrite).json_indent(output.indent));
            Pipeline::new(config).export_formats()?
        }
        Commands::ExportApi { output } => {
            Pipeline::new(base.overwrite(output.overwrite).json_indent(output.indent))
                .export_api()?
        }
        Commands::Make {
            fail_on_warn,
            overwrite,
            keep_existing,
            indent,
            formats,
        } => {
            let config = base
                .fail_on_warn(fail_on_warn)
                .overwrite(overwrite || !keep_existing)
                .json_indent(indent);
            Pipeline::new(formats.apply(config)).run()?
        }
    };
    Ok(summary)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let summary = run(cli)?;
    println!("{summary}");

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
