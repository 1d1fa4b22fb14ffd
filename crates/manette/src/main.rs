mod cli;
mod error;
mod logging;
mod watch;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use manette_gamepad::{
    list_candidates, locate, select_device, DeviceFile, DeviceIdentity, EventSource,
};

use crate::cli::{Cli, Command};
use crate::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup(cli.verbose, cli.no_color) {
        eprintln!("Unable to set up logger: {e}");
        return ExitCode::FAILURE;
    }

    let result = cli.identity().map_err(Error::from).and_then(|identity| {
        match cli.command {
            Command::Watch { path } => watch::run(&identity, path),
            Command::List => list(&identity),
            Command::Info => info(&identity),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn list(identity: &DeviceIdentity) -> Result<(), Error> {
    let candidates = list_candidates(identity)?;
    if candidates.is_empty() {
        print_warning!("no input device matches {identity}");
        return Ok(());
    }

    let chosen = select_device(identity, candidates.clone());
    for candidate in &candidates {
        match &candidate.devnode {
            Some(node) if chosen.as_path() == node.as_path() => {
                print_info!("{} {}", "*".green(), node.display());
            }
            Some(node) => {
                print_info!("  {}", node.display());
            }
            None => {
                print_debug!("matching device without a node");
            }
        }
    }
    Ok(())
}

fn info(identity: &DeviceIdentity) -> Result<(), Error> {
    let path = locate(identity);
    if path.is_empty() {
        return Err(Error::NotFound(identity.clone()));
    }
    let file = DeviceFile::open(&path)?;
    let name = file
        .device_name()
        .map_err(manette_gamepad::Error::NameQuery)?;
    print_info!("{path}: {name} ({identity})");
    Ok(())
}
