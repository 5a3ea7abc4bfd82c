//! Command line interface for preparing static grids for regridding tools.

use super::utils;
use crate::{exit_on_error, grid::CellType, regrid};
use clap::{Arg, ArgMatches, Command};
use std::str::FromStr;

/// Builds a representation of the `regrid_input` command line subcommand.
pub fn create_regrid_input_subcommand() -> Command<'static> {
    Command::new("regrid_input")
        .about("Convert a symmetric static file to the grid layout used by regridding tools")
        .arg(utils::create_input_file_arg().help("Path to the ocean static file"))
        .arg(utils::create_output_file_arg())
        .arg(
            Arg::new("grid-type")
                .short('g')
                .long("grid-type")
                .require_equals(true)
                .value_name("TYPE")
                .help("Grid type to convert (only tracer grids are supported)")
                .takes_value(true)
                .possible_values(["t", "u", "v", "c"])
                .default_value("t"),
        )
        .arg(utils::create_overwrite_arg())
        .arg(utils::create_verbose_arg())
}

/// Runs the actions for the `regrid_input` subcommand using the given arguments.
pub fn run_regrid_input_subcommand(arguments: &ArgMatches) {
    let verbose = utils::get_verbose(arguments);
    let cell_type = exit_on_error!(
        CellType::from_str(
            arguments
                .value_of("grid-type")
                .expect("No value for argument with default")
        ),
        "Error: {}"
    );

    let ds = utils::read_input_dataset(arguments, verbose);
    let output = exit_on_error!(
        regrid::static_to_regrid_input(&ds, cell_type),
        "Error: Could not convert static file: {}"
    );
    utils::write_output_dataset(&output, arguments, verbose);
}
