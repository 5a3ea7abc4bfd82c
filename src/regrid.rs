//! Conversion of static grids to the input layout of external regridding tools.

use crate::{dataset::Dataset, detection, grid::CellType};
use std::io;

/// Pairs of (output name, static file name) making up a regridding input grid.
const TRACER_REGRID_FIELDS: [(&str, &str); 5] = [
    ("lat", "geolat"),
    ("lon", "geolon"),
    ("lat_b", "geolat_c"),
    ("lon_b", "geolon_c"),
    ("mask", "wet"),
];

/// Reshapes a static file dataset into the `lat`, `lon`, `lat_b`, `lon_b` and
/// `mask` fields expected by regridding tools.
///
/// Cell bounds are taken from the corner points, which requires the static
/// file to be from symmetric memory mode. Only tracer grids are supported.
pub fn static_to_regrid_input(ds: &Dataset, cell_type: CellType) -> io::Result<Dataset> {
    if cell_type != CellType::Center {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "Only tracer grids are supported for regridding (got {} grid)",
                cell_type
            ),
        ));
    }
    if !detection::is_symmetric(ds)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Static file must be from symmetric memory mode",
        ));
    }

    let mut output = Dataset::new();
    for (output_name, static_name) in TRACER_REGRID_FIELDS {
        output.copy_variable_from(ds, static_name, output_name)?;
    }
    Ok(output)
}
