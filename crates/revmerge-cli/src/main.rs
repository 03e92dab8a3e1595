use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use commands::convert;
use review_config::Config;
use review_core::PipelineOptions;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Debug, Parser)]
#[command(name = "revmerge")]
#[command(about = "Merge Amazon product and review dumps into one deduplicated dataset")]
#[command(long_about = "Parse the legacy amazon-meta.txt dump, a review JSON file and a product metadata JSON file, normalize them into one review shape, drop duplicate reviews, relabel categories and export the result as CSV, JSON or Excel. Flags override values from the config file.")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Status line format
    #[arg(long, default_value = "human", value_enum)]
    status: output::StatusFormat,

    /// Config file (defaults to the platform config directory's revmerge/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Path to amazon-meta.txt file
    #[arg(long, value_name = "PATH")]
    txt: Option<PathBuf>,

    /// Path to JSON reviews file
    #[arg(long = "json_reviews", value_name = "PATH")]
    json_reviews: Option<PathBuf>,

    /// Path to product metadata JSON file
    #[arg(long = "json_meta", value_name = "PATH")]
    json_meta: Option<PathBuf>,

    /// Output file path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output file format: csv, json or excel (case-insensitive)
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Number of samples to process (0 for all)
    #[arg(long, value_name = "N")]
    samples: Option<usize>,
}

impl Cli {
    /// Config values with any flags given on the command line applied on top.
    fn pipeline_options(&self, config: &Config) -> PipelineOptions {
        let mut options = PipelineOptions::from(config);
        if let Some(txt) = &self.txt {
            options.txt = txt.clone();
        }
        if let Some(json_reviews) = &self.json_reviews {
            options.json_reviews = json_reviews.clone();
        }
        if let Some(json_meta) = &self.json_meta {
            options.json_meta = json_meta.clone();
        }
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        if let Some(format) = &self.format {
            options.format = format.clone();
        }
        if let Some(samples) = self.samples {
            options.samples = samples;
        }
        options
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).wrap_err("Failed to load configuration")?;
    config.validate().wrap_err("Invalid configuration")?;

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.status, cli.quiet);
    let options = cli.pipeline_options(&config);

    convert::run_convert(&options, &output)
}
