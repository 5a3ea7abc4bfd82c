//! Reading and writing of grid datasets in NetCDF format.

use super::{utils::AtomicOutputPath, Verbose};
use crate::{dataset::Dataset, io_result};
use ndarray::{ArrayD, IxDyn};
use netcdf_rs::{self as nc, File};
use std::{io, path::Path};

/// Opens an existing NetCDF file at the given path.
pub fn open_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    io_result!(nc::open(path.as_ref()))
}

/// Reads all numeric variables of the NetCDF file at the given path into a dataset.
///
/// Values are converted to double precision by the NetCDF library. Variables
/// that can not be represented as numbers (e.g. character arrays) are skipped.
pub fn read_dataset<P: AsRef<Path>>(path: P, verbose: Verbose) -> io::Result<Dataset> {
    let path = path.as_ref();
    let file = open_file(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut ds = Dataset::new();
    for dimension in file.dimensions() {
        ds.add_dimension(dimension.name(), dimension.len())?;
    }

    for var in file.variables() {
        let name = var.name();
        let dimension_names: Vec<String> = var.dimensions().iter().map(|dim| dim.name()).collect();
        let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();

        let values = match var.get_values::<f64, _>(..) {
            Ok(values) => values,
            Err(err) => {
                if verbose.is_yes() {
                    println!("Skipping non-numeric variable {} in {}: {}", name, file_name, err);
                }
                continue;
            }
        };
        if verbose.is_yes() {
            println!("Reading {} from {}", name, file_name);
        }

        let values = io_result!(ArrayD::from_shape_vec(IxDyn(&shape), values))?;
        ds.add_variable(&name, dimension_names.as_slice(), values)?;
    }
    Ok(ds)
}

/// Writes the given dataset to a new NetCDF file at the given path.
pub fn write_dataset<P: AsRef<Path>>(ds: &Dataset, path: P, verbose: Verbose) -> io::Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut file = io_result!(nc::create(path))?;

    for (name, len) in ds.dimensions() {
        io_result!(file.add_dimension(name, *len))?;
    }

    for var in ds.variables() {
        if verbose.is_yes() {
            println!("Writing {} to {}", var.name(), file_name);
        }
        let dimension_names = var.dimensions();
        let mut nc_var = io_result!(file.add_variable::<f64>(var.name(), &dimension_names))?;
        let values: Vec<f64> = var.values().iter().copied().collect();
        io_result!(nc_var.put_values(&values, ..))?;
    }
    Ok(())
}

/// Writes the given dataset to the given path through a temporary file.
///
/// An existing file is only replaced when `automatic_overwrite` is set.
pub fn write_dataset_atomically<P: AsRef<Path>>(
    ds: &Dataset,
    path: P,
    automatic_overwrite: bool,
    verbose: Verbose,
) -> io::Result<()> {
    let atomic_output_path = AtomicOutputPath::new(path)?;
    atomic_output_path.check_write_allowed(automatic_overwrite)?;

    atomic_output_path.write_and_replace(|temporary_path| write_dataset(ds, temporary_path, verbose))
}
