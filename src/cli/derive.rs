//! Command line interface for deriving grid metrics from a grid file.

use super::utils;
use crate::{
    exit_on_error, exit_with_error,
    grid::{GridSource, MomGrid, MomGridConfig},
    num::GridFloat,
};
use clap::{Arg, ArgMatches, Command};

/// Builds a representation of the `derive` command line subcommand.
pub fn create_derive_subcommand() -> Command<'static> {
    Command::new("derive")
        .about("Derive tracer, u, v and corner grid metrics from a grid file")
        .long_about(
            "Derive tracer, u, v and corner grid metrics from a grid file.\n\
             The input may be a supergrid (ocean_hgrid.nc) file, from which the metrics\n\
             are computed, or an ocean static file, from which they are copied.",
        )
        .arg(utils::create_input_file_arg())
        .arg(utils::create_output_file_arg())
        .arg(
            Arg::new("non-symmetric")
                .long("non-symmetric")
                .help(
                    "Produce metrics for non-symmetric memory mode\n\
                     (ignored for static files, which determine the mode themselves)",
                ),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .require_equals(true)
                .value_name("PRECISION")
                .help("Floating point precision of the output metrics")
                .takes_value(true)
                .possible_values(["f32", "f64"])
                .default_value("f32"),
        )
        .arg(utils::create_overwrite_arg())
        .arg(utils::create_verbose_arg())
}

/// Runs the actions for the `derive` subcommand using the given arguments.
pub fn run_derive_subcommand(arguments: &ArgMatches) {
    match arguments
        .value_of("precision")
        .expect("No value for argument with default")
    {
        "f32" => derive_and_write::<f32>(arguments),
        "f64" => derive_and_write::<f64>(arguments),
        precision => exit_with_error!("Error: Invalid precision {}", precision),
    }
}

fn derive_and_write<F: GridFloat>(arguments: &ArgMatches) {
    let verbose = utils::get_verbose(arguments);
    let config = MomGridConfig::new(!arguments.is_present("non-symmetric"), verbose);

    let input = utils::get_input_source(arguments);
    let source = exit_on_error!(
        GridSource::parse(input),
        "Error: Could not interpret grid source: {}"
    );

    let grid = exit_on_error!(
        MomGrid::<F>::new(source, config),
        "Error: Could not obtain grid metrics from {}: {}",
        input
    );
    if verbose.is_yes() {
        println!(
            "Obtained {} grid metrics in {} precision from {}",
            if grid.is_symmetric() {
                "symmetric"
            } else {
                "non-symmetric"
            },
            F::NAME,
            grid.source()
        );
    }

    let ds = exit_on_error!(
        grid.to_dataset(),
        "Error: Could not assemble grid metrics: {}"
    );
    utils::write_output_dataset(&ds, arguments, verbose);
}
