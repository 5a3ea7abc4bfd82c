//! Inference of the kind of grid file a dataset was read from.

use crate::dataset::Dataset;
use std::{fmt, io};

/// Variables that every supergrid (`ocean_hgrid.nc`) file contains.
pub const SUPERGRID_VARIABLE_NAMES: [&str; 4] = ["x", "y", "dx", "dy"];

/// Variables that every static (`ocean_static.nc`) file contains.
pub const STATIC_VARIABLE_NAMES: [&str; 2] = ["geolon", "geolat"];

/// Default names of the tracer and corner point dimensions.
pub const TRACER_X_DIM: &str = "xh";
pub const TRACER_Y_DIM: &str = "yh";
pub const CORNER_X_DIM: &str = "xq";
pub const CORNER_Y_DIM: &str = "yq";

/// Layout of a grid dataset, as inferred from the variables it contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFileFormat {
    Supergrid,
    Static,
    Both,
    Neither,
}

impl GridFileFormat {
    pub fn has_supergrid(&self) -> bool {
        matches!(self, Self::Supergrid | Self::Both)
    }

    pub fn has_static(&self) -> bool {
        matches!(self, Self::Static | Self::Both)
    }
}

impl fmt::Display for GridFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Supergrid => "supergrid",
                Self::Static => "static",
                Self::Both => "supergrid and static",
                Self::Neither => "unknown",
            }
        )
    }
}

/// Whether the dataset corresponds to a supergrid file.
pub fn is_supergrid(ds: &Dataset) -> bool {
    ds.has_variables(&SUPERGRID_VARIABLE_NAMES)
}

/// Whether the dataset corresponds to an ocean static file.
pub fn is_static(ds: &Dataset) -> bool {
    ds.has_variables(&STATIC_VARIABLE_NAMES)
}

/// Classifies the dataset by the variables it contains.
pub fn detect_format(ds: &Dataset) -> GridFileFormat {
    match (is_supergrid(ds), is_static(ds)) {
        (true, true) => GridFileFormat::Both,
        (true, false) => GridFileFormat::Supergrid,
        (false, true) => GridFileFormat::Static,
        (false, false) => GridFileFormat::Neither,
    }
}

/// Tests whether the dataset was written in symmetric memory mode, using the
/// default dimension names.
pub fn is_symmetric(ds: &Dataset) -> io::Result<bool> {
    is_symmetric_with_names(ds, TRACER_X_DIM, TRACER_Y_DIM, CORNER_X_DIM, CORNER_Y_DIM)
}

/// Tests whether the dataset was written in symmetric memory mode.
///
/// In symmetric mode there is one more corner point than tracer points along
/// each horizontal dimension, in non-symmetric mode the counts are equal.
pub fn is_symmetric_with_names(
    ds: &Dataset,
    xh: &str,
    yh: &str,
    xq: &str,
    yq: &str,
) -> io::Result<bool> {
    let len = |name: &str| ds.require_dimension_len(name).map(|len| len as i64);

    let x_diff = len(xq)? - len(xh)?;
    let y_diff = len(yq)? - len(yh)?;

    if x_diff != y_diff {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Difference of tracer and corner points must be identical for x and y dimensions (got {} and {})",
                x_diff, y_diff
            ),
        ));
    }
    match x_diff {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Dataset is neither symmetric nor non-symmetric (corner and tracer point counts differ by {})",
                x_diff
            ),
        )),
    }
}
