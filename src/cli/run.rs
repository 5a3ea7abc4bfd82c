//! Function for running the command line program.

use super::{
    build, derive::run_derive_subcommand, inspect::run_inspect_subcommand,
    regrid_input::run_regrid_input_subcommand,
};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `momgrid` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `momgrid` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    if let Some(derive_arguments) = arguments.subcommand_matches("derive") {
        run_derive_subcommand(derive_arguments);
    }
    if let Some(regrid_input_arguments) = arguments.subcommand_matches("regrid_input") {
        run_regrid_input_subcommand(regrid_input_arguments);
    }
    if let Some(inspect_arguments) = arguments.subcommand_matches("inspect") {
        run_inspect_subcommand(inspect_arguments);
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
