use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Check the licenses of a project's dependencies and save what they oblige you to ship
#[derive(Parser, Debug)]
#[command(name = "depcomply")]
#[command(version)]
#[command(
    about = "License compliance for dependency trees: scan license files, resolve obligations, and save notices or source",
    long_about = None
)]
pub struct Args {
    /// Show diagnostic logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan every dependency and write the compliance manifest
    Report(ReportArgs),
    /// Copy license notices or full source for every row of a manifest
    Save(SaveArgs),
    /// Scan every dependency and fail if any license is forbidden or unknown
    Check(CheckArgs),
}

/// Options shared by the commands that locate the project
#[derive(ClapArgs, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to depcomply.config.yml in the project directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exclude components matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "github.com/acme/*" -e "*/internal"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

#[derive(ClapArgs, Debug)]
pub struct SaveArgs {
    /// Manifest produced by `depcomply report`
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Destination directory; must not exist unless --force is given
    #[arg(long, value_name = "DIR")]
    pub save_path: PathBuf,

    /// Delete the destination directory first if it exists
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(ClapArgs, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Exclude components matching patterns (supports wildcards: *)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
