use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bizdash")]
#[command(author, version, about = "Business analytics dashboard")]
pub struct Cli {
    /// Dashboard configuration file (JSON). Defaults apply when omitted.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the charts to PNG files without opening a window
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory, created if missing
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Chart width in logical pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Chart height in logical pixels
    #[arg(long, default_value_t = 400.0)]
    pub height: f64,

    /// Device pixel ratio
    #[arg(long, default_value_t = 1.0)]
    pub dpr: f64,

    /// Skip text rendering (labels, legend)
    #[arg(long)]
    pub no_text: bool,
}
