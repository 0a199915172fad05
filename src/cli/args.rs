// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the CLI surface for creating and opening notebooks from templates

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nblaunch")]
#[command(about = "Create a notebook from a template and open it in a notebook server")]
#[command(version)]
pub struct Args {
    #[arg(help = "Template notebook file")]
    pub template: PathBuf,

    #[arg(help = "Target notebook file to create")]
    pub target: PathBuf,

    #[arg(help = "Template variables in the format NAME=VALUE")]
    pub vars: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
