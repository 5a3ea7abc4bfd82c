//! Grid metrics from ocean static files (`ocean_static.nc`).

use super::{CellMetrics, CellType};
use crate::{
    dataset::Dataset,
    num::{self as mnum, GridFloat},
};
use std::io;

/// Reads the metrics of the given cell type as stored in a static file.
///
/// Static files carry no widths for corner cells.
pub fn read_static_metrics<F: GridFloat>(
    ds: &Dataset,
    cell_type: CellType,
) -> io::Result<CellMetrics<F>> {
    let read = |name: &str| -> io::Result<_> {
        let values = ds.variable_values_2d(name)?;
        Ok(mnum::narrow::<F>(values.view()))
    };

    let geolon = read(cell_type.longitude_name().as_str())?;
    let geolat = read(cell_type.latitude_name().as_str())?;
    let area = read(cell_type.static_area_name())?;
    let widths = match cell_type.width_names() {
        Some((dx_name, dy_name)) => Some((read(dx_name)?, read(dy_name)?)),
        None => None,
    };

    CellMetrics::new(geolon, geolat, area, widths).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Inconsistent {} cell metrics in static file: {}", cell_type, err),
        )
    })
}
