//! Function for building the command line hierarchy.

use super::{
    derive::create_derive_subcommand, inspect::create_inspect_subcommand,
    regrid_input::create_regrid_input_subcommand,
};
use clap::{self, Arg, Command};

/// Builds the `momgrid` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
        .subcommand(create_derive_subcommand())
        .subcommand(create_regrid_input_subcommand())
        .subcommand(create_inspect_subcommand())
}
