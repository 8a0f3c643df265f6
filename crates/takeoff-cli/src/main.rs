mod commands;
mod output;

use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "takeoff",
    version,
    about = "Emergency lighting takeoff from scanned electrical drawing sets",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Path to the PDF drawing set
    #[arg(value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Directory for the report and overlay images (created if missing)
    #[arg(short = 'd', long = "out-dir", value_name = "DIR", default_value = "output")]
    out_dir: PathBuf,

    /// JSON config file overriding the default markers and thresholds
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Summary format on stdout: table (default) or json
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Skip writing annotated page images
    #[arg(long)]
    no_overlays: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and validate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default configuration as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
        None => {
            init_logging(cli.process.verbose);
            let Some(input_file) = cli.process.input_file.clone() else {
                Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "an input PDF <FILE> is required",
                    )
                    .exit();
            };
            commands::process::run(input_file, &cli.process)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("takeoff_core={level},takeoff={level},{level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
