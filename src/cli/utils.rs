//! Utilities for creating the command line interface.

use crate::{dataset::Dataset, exit_on_error, io::netcdf, io::Verbose};
use clap::{Arg, ArgMatches};
use std::path::PathBuf;

pub fn create_input_file_arg() -> Arg<'static> {
    Arg::new("input-file")
        .value_name("INPUT_FILE")
        .help("Path to the supergrid (ocean_hgrid.nc) or static (ocean_static.nc) file")
        .required(true)
        .takes_value(true)
}

pub fn create_output_file_arg() -> Arg<'static> {
    Arg::new("output-file")
        .value_name("OUTPUT_FILE")
        .help("Path where the output NetCDF file should be created")
        .required(true)
        .takes_value(true)
}

pub fn create_overwrite_arg() -> Arg<'static> {
    Arg::new("overwrite")
        .long("overwrite")
        .help("Automatically overwrite any existing output file")
}

pub fn create_verbose_arg() -> Arg<'static> {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Print status messages related to reading and writing")
}

pub fn get_verbose(arguments: &ArgMatches) -> Verbose {
    Verbose::from(arguments.is_present("verbose"))
}

/// Returns the input file argument as given on the command line.
pub fn get_input_source(arguments: &ArgMatches) -> &str {
    arguments
        .value_of("input-file")
        .expect("No value for required argument")
}

/// Returns the path of the output file, with the `nc` extension added if missing.
pub fn get_output_file_path(arguments: &ArgMatches) -> PathBuf {
    let mut output_file_path = PathBuf::from(
        arguments
            .value_of("output-file")
            .expect("No value for required argument"),
    );
    if output_file_path.extension().is_none() {
        output_file_path.set_extension("nc");
    }
    output_file_path
}

/// Reads the input file into a dataset, exiting on failure.
pub fn read_input_dataset(arguments: &ArgMatches, verbose: Verbose) -> Dataset {
    let input_file_path = get_input_source(arguments);
    exit_on_error!(
        netcdf::read_dataset(input_file_path, verbose),
        "Error: Could not read input file {}: {}",
        input_file_path
    )
}

/// Writes the given dataset to the output file, exiting on failure.
pub fn write_output_dataset(ds: &Dataset, arguments: &ArgMatches, verbose: Verbose) {
    let output_file_path = get_output_file_path(arguments);
    exit_on_error!(
        netcdf::write_dataset_atomically(
            ds,
            &output_file_path,
            arguments.is_present("overwrite"),
            verbose
        ),
        "Error: Could not write output file {}: {}",
        output_file_path.display()
    );
}
