#![allow(dead_code)]

use momgrid::{dataset::Dataset, grid::CellType};
use ndarray::Array2;
use std::path::PathBuf;

/// Number of tracer points in y and x of the synthetic grids.
pub const NJ: usize = 3;
pub const NI: usize = 4;

/// Longitude and latitude spacing of supergrid points in degrees.
pub const DLON: f64 = 0.5;
pub const DLAT: f64 = 0.25;

/// Builds a supergrid for a regular longitude-latitude box where every
/// supergrid cell has unit edge lengths and unit area.
pub fn uniform_supergrid() -> Dataset {
    let (nyp, nxp) = (2 * NJ + 1, 2 * NI + 1);
    let mut ds = Dataset::new();
    ds.add_variable_2d(
        "x",
        ["nyp", "nxp"],
        Array2::from_shape_fn((nyp, nxp), |(_, i)| -10.0 + DLON * i as f64),
    )
    .unwrap();
    ds.add_variable_2d(
        "y",
        ["nyp", "nxp"],
        Array2::from_shape_fn((nyp, nxp), |(j, _)| 40.0 + DLAT * j as f64),
    )
    .unwrap();
    ds.add_variable_2d("dx", ["nyp", "nx"], Array2::ones((nyp, nxp - 1)))
        .unwrap();
    ds.add_variable_2d("dy", ["ny", "nxp"], Array2::ones((nyp - 1, nxp)))
        .unwrap();
    ds.add_variable_2d("area", ["ny", "nx"], Array2::ones((nyp - 1, nxp - 1)))
        .unwrap();
    ds
}

/// Renames the variables of an exported grid to the names used in ocean
/// static files and adds a wet mask.
pub fn to_static_dataset(exported: &Dataset) -> Dataset {
    let mut ds = Dataset::new();
    for cell_type in CellType::ALL {
        for name in [cell_type.longitude_name(), cell_type.latitude_name()] {
            ds.copy_variable_from(exported, &name, &name).unwrap();
        }
        ds.copy_variable_from(exported, &cell_type.area_name(), cell_type.static_area_name())
            .unwrap();
        if let Some((dx_name, dy_name)) = cell_type.width_names() {
            ds.copy_variable_from(exported, dx_name, dx_name).unwrap();
            ds.copy_variable_from(exported, dy_name, dy_name).unwrap();
        }
    }
    let shape = ds.variable("geolon").unwrap().shape().to_vec();
    ds.add_variable_2d("wet", ["yh", "xh"], Array2::ones((shape[0], shape[1])))
        .unwrap();
    ds
}

/// Scratch directory for the output files of a test.
#[derive(Debug)]
pub struct Test {
    output_dir: tempfile::TempDir,
}

impl Test {
    pub fn new() -> Self {
        Self {
            output_dir: tempfile::tempdir().expect("Could not create temporary directory"),
        }
    }

    pub fn output_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.output_dir.path().join(file_name.as_ref())
    }
}
