use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "lanthi - predict lanthipeptide precursors, modifications and masses from annotated gene clusters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict lanthipeptides for every lanthipeptide cluster in a record.
    Predict(PredictArgs),
    /// Merge previously saved results into a record.
    Restore(RestoreArgs),
}

/// Arguments for the `predict` subcommand.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Path to the annotated input record (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the prediction results (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write a copy of the record with the predictions attached.
    #[arg(long, value_name = "PATH")]
    pub annotate: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub fimo: FimoToggle,

    /// Override the FIMO executable.
    #[arg(long, value_name = "PATH")]
    pub fimo_path: Option<PathBuf>,

    /// Override the cleavage-site motif file (MEME format).
    #[arg(long, value_name = "PATH")]
    pub motif_file: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S precursors.max-length=150
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Mutually exclusive switches for the external motif-scoring tool.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct FimoToggle {
    /// Refine leader/core splits with FIMO.
    #[arg(long)]
    pub with_fimo: bool,
    /// Never run FIMO; use the fixed cleavage rules only.
    #[arg(long)]
    pub without_fimo: bool,
}

/// Arguments for the `restore` subcommand.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Path to results written by `predict`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the record the results were computed for.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub record: PathBuf,

    /// Path for the annotated record.
    #[arg(long, required = true, value_name = "PATH")]
    pub annotate: PathBuf,
}
