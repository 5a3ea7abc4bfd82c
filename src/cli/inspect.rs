//! Command line interface for inspecting grid files.

use super::utils;
use crate::{
    detection::{self, GridFileFormat},
    exit_on_error,
    grid::{CellType, MomGrid, MomGridConfig},
};
use clap::{ArgMatches, Command};

/// Builds a representation of the `inspect` command line subcommand.
pub fn create_inspect_subcommand() -> Command<'static> {
    Command::new("inspect")
        .about("Print the detected format, memory mode and grid shapes of a grid file")
        .arg(utils::create_input_file_arg())
        .arg(utils::create_verbose_arg())
}

/// Runs the actions for the `inspect` subcommand using the given arguments.
pub fn run_inspect_subcommand(arguments: &ArgMatches) {
    let verbose = utils::get_verbose(arguments);
    let ds = utils::read_input_dataset(arguments, verbose);

    let format = detection::detect_format(&ds);
    println!("Format: {}", format);
    if format == GridFileFormat::Neither {
        return;
    }

    let symmetric = if format.has_static() {
        exit_on_error!(
            detection::is_symmetric(&ds),
            "Error: Could not determine memory mode: {}"
        )
    } else {
        true
    };
    let grid = exit_on_error!(
        MomGrid::<f64>::from_dataset(&ds, MomGridConfig::new(symmetric, verbose)),
        "Error: Could not obtain grid metrics: {}"
    );
    println!(
        "Memory mode: {}",
        if grid.is_symmetric() {
            "symmetric"
        } else {
            "non-symmetric"
        }
    );
    for cell_type in CellType::ALL {
        let (ny, nx) = grid.metrics(cell_type).shape();
        println!("{} points: {} x {}", cell_type, ny, nx);
    }
}
