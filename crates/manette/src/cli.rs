use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use manette_gamepad::{DeviceIdentity, DEFAULT_IDENTITY};

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Print button changes until Ctrl+C or the gamepad goes away.
    Watch {
        /// Open this node instead of searching for the gamepad
        #[clap(short, long)]
        path: Option<PathBuf>,
    },
    /// List the input nodes of the gamepad, marking the one that would be used.
    List,
    /// Show the chosen node and the name the kernel reports for it.
    Info,
}

/// Reads a USB gamepad through evdev and prints its buttons.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// USB vendor id to look for (4 hex digits)
    #[arg(long, global = true)]
    pub vendor: Option<String>,

    /// USB product id to look for (4 hex digits)
    #[arg(long, global = true)]
    pub product: Option<String>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The identity to search for, the built-in pad unless overridden.
    pub fn identity(&self) -> manette_gamepad::Result<DeviceIdentity> {
        match (&self.vendor, &self.product) {
            (None, None) => Ok(DEFAULT_IDENTITY),
            (vendor, product) => DeviceIdentity::parse(
                vendor.as_deref().unwrap_or(DEFAULT_IDENTITY.vendor_id()),
                product.as_deref().unwrap_or(DEFAULT_IDENTITY.product_id()),
            ),
        }
    }
}
