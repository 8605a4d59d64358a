use clap::{
    Args,
    Parser,
    Subcommand,
};

use crate::errors::LvgError;

#[derive(Debug, Parser)]
#[clap(
    author = "lvg-rs developers",
    version,
    about = "Converge LVM volume groups to a declared manifest"
)]
pub struct Cli {
    #[command(subcommand)]
    pub commands: Option<Commands>,

    /// Manifest file
    #[arg(
        global = true,
        short = 'f',
        long = "file",
        value_parser = validate_filename,
        default_value_t = String::from("./manifest.yaml")
    )]
    pub manifest: String,

    /// Dry-run, lvg-rs will only query the host
    /// and print the commands it would run
    #[arg(global = true, short = 'n', long = "dry-run", default_value_t = false)]
    pub dry_run: bool,

    /// Log debug messages, including commands and their output
    #[arg(global = true, short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Converge all volume groups in the manifest
    Apply(ArgsApply),

    /// Validate manifest without touching the host (default)
    Validate,
}

#[derive(Debug, Args)]
pub struct ArgsApply {
    /// Do not validate manifest entries
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

fn validate_filename(name: &str) -> Result<String, LvgError> {
    if name.is_empty() {
        return Err(LvgError::BadArgs(String::from("empty filename")));
    }

    Ok(name.to_string())
}
