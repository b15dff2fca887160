use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fareline", version, about = "Flight blocking and EMD script generator")]
pub struct Cli {
    /// Directory holding default/<run mode>/local configuration files
    #[arg(short, long, default_value = "config", global = true)]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the blocking script, EMD script and booking summary
    Generate(GenerateArgs),

    /// List the airlines in the commission table
    Carriers,

    /// Read basic and total fares from a fare-quote screenshot
    ReadFares {
        /// Screenshot (PNG or JPG)
        image: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Submission file (JSON)
    pub submission: PathBuf,

    /// Fare-quote screenshot; overrides the one named in the submission
    #[arg(short, long)]
    pub screenshot: Option<PathBuf>,

    /// Directory for the booking summary (defaults to export.output_dir)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Print the result as one JSON document
    #[arg(long)]
    pub json: bool,

    /// Skip writing the booking summary file
    #[arg(long)]
    pub no_export: bool,
}
