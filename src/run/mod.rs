pub mod apply;
pub mod validate;

use std::env;

use colored::Colorize;

use crate::constants::defaults;
use crate::errors::LvgError;
use crate::manifest::Manifest;
use crate::{
    cli,
    constants,
};

pub fn run(cli_args: cli::Cli) -> Result<(), LvgError> {
    match cli_args.commands {
        // Default is to validate
        None | Some(cli::Commands::Validate) => validate::run(&cli_args.manifest),

        Some(cli::Commands::Apply(args_apply)) => {
            let report = apply::run(&cli_args.manifest, &fstab_location(), cli_args.dry_run, args_apply)?;

            match report.changed() {
                true => eprintln!("{}", "volume groups converged with changes".green()),
                false => eprintln!("{}", "volume groups already converged".green()),
            }

            println!("{}", report.to_json_string());

            Ok(())
        }
    }
}

fn read_manifest(manifest_file: &str) -> Result<Manifest, LvgError> {
    let manifest_yaml = std::fs::read_to_string(manifest_file)
        .map_err(|err| LvgError::NoSuchFile(err, manifest_file.to_string()))?;

    Manifest::from_yaml(&manifest_yaml)
}

fn fstab_location() -> String {
    env::var(constants::ENV_LVG_FSTAB).unwrap_or(defaults::FSTAB.to_string())
}
