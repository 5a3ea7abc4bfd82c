//! Reduction of a supergrid (`ocean_hgrid.nc`) to model grid metrics.
//!
//! The supergrid has twice the resolution of the model grid, so every model
//! cell is covered by 2x2 supergrid cells. Tracer points sit on odd supergrid
//! points in both directions, corner points on even ones, and u- and v-points
//! on mixed ones. Coordinates are obtained by striding through the supergrid
//! points, widths by adding two neighbouring supergrid edge lengths and areas
//! by adding 2x2 blocks of supergrid cell areas.

use super::{CellMetrics, CellType};
use crate::{
    dataset::Dataset,
    num::{self as mnum, GridFloat},
};
use ndarray::prelude::*;
use std::io;

/// Supergrid point coordinates, edge lengths and cell areas.
#[derive(Clone, Debug)]
pub struct Supergrid {
    /// Longitudes of the supergrid points, shape `(2NJ+1, 2NI+1)`.
    x: Array2<f64>,
    /// Latitudes of the supergrid points, shape `(2NJ+1, 2NI+1)`.
    y: Array2<f64>,
    /// Lengths of the zonal supergrid edges, shape `(2NJ+1, 2NI)`.
    dx: Array2<f64>,
    /// Lengths of the meridional supergrid edges, shape `(2NJ, 2NI+1)`.
    dy: Array2<f64>,
    /// Cell areas, padded with a copy of the first row and column to shape `(2NJ+1, 2NI+1)`.
    padded_area: Array2<f64>,
}

impl Supergrid {
    /// Reads the supergrid variables `x`, `y`, `dx`, `dy` and `area` from the dataset.
    pub fn from_dataset(ds: &Dataset) -> io::Result<Self> {
        let x = ds.variable_values_2d("x")?;
        let y = ds.variable_values_2d("y")?;
        let dx = ds.variable_values_2d("dx")?;
        let dy = ds.variable_values_2d("dy")?;
        let area = ds.variable_values_2d("area")?;
        Self::new(x, y, dx, dy, area)
    }

    /// Creates a supergrid from its point coordinates, edge lengths and cell areas.
    pub fn new(
        x: Array2<f64>,
        y: Array2<f64>,
        dx: Array2<f64>,
        dy: Array2<f64>,
        area: Array2<f64>,
    ) -> io::Result<Self> {
        let (nyp, nxp) = x.dim();
        if nyp < 3 || nxp < 3 || nyp % 2 == 0 || nxp % 2 == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Supergrid point shape ({}, {}) must be odd and at least (3, 3)",
                    nyp, nxp
                ),
            ));
        }
        let (ny, nx) = (nyp - 1, nxp - 1);
        for (name, actual, expected) in [
            ("y", y.dim(), (nyp, nxp)),
            ("dx", dx.dim(), (nyp, nx)),
            ("dy", dy.dim(), (ny, nxp)),
            ("area", area.dim(), (ny, nx)),
        ] {
            if actual != expected {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Supergrid variable {} has shape {:?}, expected {:?}",
                        name, actual, expected
                    ),
                ));
            }
        }

        let padded_area = prepend_first_column(prepend_first_row(area.view()).view());

        Ok(Self {
            x,
            y,
            dx,
            dy,
            padded_area,
        })
    }

    /// Number of (y, x) tracer points of the model grid.
    pub fn tracer_shape(&self) -> (usize, usize) {
        let (nyp, nxp) = self.x.dim();
        ((nyp - 1) / 2, (nxp - 1) / 2)
    }

    /// Computes the metrics of the given cell type in the given memory mode.
    ///
    /// In non-symmetric mode the first row and/or column of points along the
    /// staggered directions is dropped.
    pub fn derive_metrics<F: GridFloat>(
        &self,
        cell_type: CellType,
        symmetric: bool,
    ) -> io::Result<CellMetrics<F>> {
        let (geolon, geolat, area, widths) = match cell_type {
            CellType::Center => self.center_metrics(),
            CellType::U => self.u_metrics(),
            CellType::V => self.v_metrics(),
            CellType::Corner => self.corner_metrics(),
        };

        let (skip_rows, skip_cols) = match (cell_type, symmetric) {
            (_, true) | (CellType::Center, false) => (0, 0),
            (CellType::U, false) => (0, 1),
            (CellType::V, false) => (1, 0),
            (CellType::Corner, false) => (1, 1),
        };
        let finish = |values: Array2<f64>| -> Array2<F> {
            mnum::narrow(values.slice(s![skip_rows.., skip_cols..]))
        };

        CellMetrics::new(
            finish(geolon),
            finish(geolat),
            finish(area),
            widths.map(|(dx, dy)| (finish(dx), finish(dy))),
        )
    }

    fn center_metrics(&self) -> DerivedMetrics {
        let (x, y, dx, dy) = (&self.x, &self.y, &self.dx, &self.dy);

        let geolon = x.slice(s![1..;2, 1..;2]).to_owned();
        let geolat = y.slice(s![1..;2, 1..;2]).to_owned();
        let dxt = &dx.slice(s![1..;2, ..;2]) + &dx.slice(s![1..;2, 1..;2]);
        let dyt = &dy.slice(s![..;2, 1..;2]) + &dy.slice(s![1..;2, 1..;2]);

        let area = self.padded_area.slice(s![..-1, ..-1]);
        let area = sum_of_four(
            area.slice(s![..;2, ..;2]),
            area.slice(s![1..;2, 1..;2]),
            area.slice(s![..;2, 1..;2]),
            area.slice(s![1..;2, ..;2]),
        );

        (geolon, geolat, area, Some((dxt, dyt)))
    }

    fn u_metrics(&self) -> DerivedMetrics {
        let (x, y, dx, dy) = (&self.x, &self.y, &self.dx, &self.dy);

        let geolon = x.slice(s![1..;2, ..;2]).to_owned();
        let geolat = y.slice(s![1..;2, ..;2]).to_owned();

        let dx_cu = &dx.slice(s![1..;2, ..;2])
            + &roll_columns_left(dx.slice(s![1..;2, ..-1;2]));
        let dx_cu = prepend_first_column(dx_cu.view());

        let dy_cu = &dy.slice(s![..;2, 2..;2]) + &dy.slice(s![1..;2, 2..;2]);
        let dy_cu = prepend_first_column(dy_cu.view());

        let area = self.padded_area.slice(s![..-1, ..]);
        let area = sum_of_four(
            area.slice(s![..;2, 1..;2]),
            area.slice(s![1..;2, 2..;2]),
            area.slice(s![..;2, 2..;2]),
            area.slice(s![1..;2, 1..;2]),
        );
        let area = prepend_first_column(area.view());

        (geolon, geolat, area, Some((dx_cu, dy_cu)))
    }

    fn v_metrics(&self) -> DerivedMetrics {
        let (x, y, dx, dy) = (&self.x, &self.y, &self.dx, &self.dy);

        let geolon = x.slice(s![..;2, 1..;2]).to_owned();
        let geolat = y.slice(s![..;2, 1..;2]).to_owned();

        let dx_cv = &dx.slice(s![2..;2, ..;2]) + &dx.slice(s![2..;2, 1..;2]);
        let dx_cv = prepend_first_row(dx_cv.view());

        let dy_cv = &dy.slice(s![..;2, 2..;2]) + &dy.slice(s![1..;2, 2..;2]);
        let dy_cv = prepend_first_row(dy_cv.view());

        let area = self.padded_area.slice(s![.., ..-1]);
        let area = sum_of_four(
            area.slice(s![1..;2, ..;2]),
            area.slice(s![2..;2, 1..;2]),
            area.slice(s![1..;2, 1..;2]),
            area.slice(s![2..;2, ..;2]),
        );
        let area = prepend_first_row(area.view());

        (geolon, geolat, area, Some((dx_cv, dy_cv)))
    }

    fn corner_metrics(&self) -> DerivedMetrics {
        let geolon = self.x.slice(s![..;2, ..;2]).to_owned();
        let geolat = self.y.slice(s![..;2, ..;2]).to_owned();

        let area = &self.padded_area;
        let area = sum_of_four(
            area.slice(s![1..;2, 1..;2]),
            area.slice(s![2..;2, 2..;2]),
            area.slice(s![1..;2, 2..;2]),
            area.slice(s![2..;2, 1..;2]),
        );
        let area = prepend_first_column(prepend_first_row(area.view()).view());

        (geolon, geolat, area, None)
    }
}

/// Longitudes, latitudes, areas and optional (x, y) widths in double precision,
/// laid out for symmetric memory mode.
type DerivedMetrics = (
    Array2<f64>,
    Array2<f64>,
    Array2<f64>,
    Option<(Array2<f64>, Array2<f64>)>,
);

fn sum_of_four(
    a: ArrayView2<f64>,
    b: ArrayView2<f64>,
    c: ArrayView2<f64>,
    d: ArrayView2<f64>,
) -> Array2<f64> {
    let mut sum = a.to_owned();
    sum += &b;
    sum += &c;
    sum += &d;
    sum
}

/// Returns a copy of the array with the first row duplicated in front.
fn prepend_first_row(values: ArrayView2<f64>) -> Array2<f64> {
    let (n_rows, n_cols) = values.dim();
    Array2::from_shape_fn((n_rows + 1, n_cols), |(i, j)| {
        values[[i.saturating_sub(1), j]]
    })
}

/// Returns a copy of the array with the first column duplicated in front.
fn prepend_first_column(values: ArrayView2<f64>) -> Array2<f64> {
    let (n_rows, n_cols) = values.dim();
    Array2::from_shape_fn((n_rows, n_cols + 1), |(i, j)| {
        values[[i, j.saturating_sub(1)]]
    })
}

/// Shifts the columns one step to the left, moving the first column to the end.
fn roll_columns_left(values: ArrayView2<f64>) -> Array2<f64> {
    let (n_rows, n_cols) = values.dim();
    Array2::from_shape_fn((n_rows, n_cols), |(i, j)| values[[i, (j + 1) % n_cols]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Supergrid with 2x3 tracer cells where every value encodes its own
    /// position, so that strides and sums can be checked by hand.
    fn indexed_supergrid() -> Supergrid {
        let x = Array2::from_shape_fn((5, 7), |(_, i)| i as f64);
        let y = Array2::from_shape_fn((5, 7), |(j, _)| 10.0 * j as f64);
        let dx = Array2::from_shape_fn((5, 6), |(j, i)| (10 * j + i) as f64);
        let dy = Array2::from_shape_fn((4, 7), |(j, i)| (10 * j + i) as f64);
        let area = Array2::from_shape_fn((4, 6), |(j, i)| (10 * j + i) as f64);
        Supergrid::new(x, y, dx, dy, area).unwrap()
    }

    #[test]
    fn single_tracer_cell_gives_staggered_shapes() {
        let supergrid = Supergrid::new(
            Array2::zeros((3, 3)),
            Array2::zeros((3, 3)),
            Array2::ones((3, 2)),
            Array2::ones((2, 3)),
            Array2::ones((2, 2)),
        )
        .unwrap();
        for (cell_type, shape) in [
            (CellType::Center, (1, 1)),
            (CellType::U, (1, 2)),
            (CellType::V, (2, 1)),
            (CellType::Corner, (2, 2)),
        ] {
            let symmetric = supergrid.derive_metrics::<f64>(cell_type, true).unwrap();
            assert_eq!(symmetric.shape(), shape);
            let non_symmetric = supergrid.derive_metrics::<f64>(cell_type, false).unwrap();
            assert_eq!(non_symmetric.shape(), (1, 1));
        }
    }

    #[test]
    fn helpers_pad_and_roll() {
        let values = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(
            prepend_first_row(values.view()),
            array![[1.0, 2.0], [1.0, 2.0], [3.0, 4.0]]
        );
        assert_eq!(
            prepend_first_column(values.view()),
            array![[1.0, 1.0, 2.0], [3.0, 3.0, 4.0]]
        );
        assert_eq!(
            roll_columns_left(array![[1.0, 2.0, 3.0]].view()),
            array![[2.0, 3.0, 1.0]]
        );
    }

    #[test]
    fn invalid_supergrid_shapes_are_rejected() {
        let err = Supergrid::new(
            Array2::zeros((4, 7)),
            Array2::zeros((4, 7)),
            Array2::zeros((4, 6)),
            Array2::zeros((3, 7)),
            Array2::zeros((3, 6)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err = Supergrid::new(
            Array2::zeros((5, 7)),
            Array2::zeros((5, 7)),
            Array2::zeros((5, 6)),
            Array2::zeros((4, 7)),
            Array2::zeros((5, 6)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn center_metrics_use_odd_points() {
        let metrics = indexed_supergrid()
            .derive_metrics::<f64>(CellType::Center, true)
            .unwrap();
        assert_eq!(metrics.shape(), (2, 3));
        assert_eq!(metrics.geolon(), &array![[1.0, 3.0, 5.0], [1.0, 3.0, 5.0]]);
        assert_eq!(metrics.geolat(), &array![[10.0, 10.0, 10.0], [30.0, 30.0, 30.0]]);
        // dx rows 1 and 3, columns (0,1), (2,3), (4,5)
        assert_eq!(
            metrics.dx().unwrap(),
            &array![[21.0, 25.0, 29.0], [61.0, 65.0, 69.0]]
        );
        // dy rows (0,1) and (2,3), columns 1, 3, 5
        assert_eq!(
            metrics.dy().unwrap(),
            &array![[12.0, 16.0, 20.0], [52.0, 56.0, 60.0]]
        );
        // Padded area rows [0, 0, 1, 2, 3] and columns [0, 0, 1, 2, 3, 4, 5]
        assert_eq!(
            metrics.area(),
            &array![[0.0, 6.0, 14.0], [60.0, 66.0, 74.0]]
        );
    }

    #[test]
    fn u_metrics_include_western_boundary_in_symmetric_mode() {
        let supergrid = indexed_supergrid();
        let symmetric = supergrid.derive_metrics::<f64>(CellType::U, true).unwrap();
        assert_eq!(symmetric.shape(), (2, 4));
        assert_eq!(
            symmetric.geolon(),
            &array![[0.0, 2.0, 4.0, 6.0], [0.0, 2.0, 4.0, 6.0]]
        );
        // Columns 0, 2, 4 of dx rows 1 and 3 plus their left-rolled counterparts
        assert_eq!(
            symmetric.dx().unwrap(),
            &array![[22.0, 22.0, 26.0, 24.0], [62.0, 62.0, 66.0, 64.0]]
        );
        assert_eq!(
            symmetric.dy().unwrap(),
            &array![[14.0, 14.0, 18.0, 22.0], [54.0, 54.0, 58.0, 62.0]]
        );
        assert_eq!(
            symmetric.area(),
            &array![[2.0, 2.0, 10.0, 18.0], [62.0, 62.0, 70.0, 78.0]]
        );

        assert_eq!(
            symmetric.geolat(),
            &array![[10.0, 10.0, 10.0, 10.0], [30.0, 30.0, 30.0, 30.0]]
        );

        let non_symmetric = supergrid.derive_metrics::<f64>(CellType::U, false).unwrap();
        assert_eq!(non_symmetric.shape(), (2, 3));
        assert_eq!(
            non_symmetric.area(),
            &symmetric.area().slice(s![.., 1..]).to_owned()
        );
        assert_eq!(
            non_symmetric.dx().unwrap(),
            &array![[22.0, 26.0, 24.0], [62.0, 66.0, 64.0]]
        );
        assert_eq!(
            non_symmetric.dy().unwrap(),
            &array![[14.0, 18.0, 22.0], [54.0, 58.0, 62.0]]
        );
        assert_eq!(
            non_symmetric.geolat(),
            &array![[10.0, 10.0, 10.0], [30.0, 30.0, 30.0]]
        );
    }

    #[test]
    fn v_metrics_include_southern_boundary_in_symmetric_mode() {
        let supergrid = indexed_supergrid();
        let symmetric = supergrid.derive_metrics::<f64>(CellType::V, true).unwrap();
        assert_eq!(symmetric.shape(), (3, 3));
        assert_eq!(
            symmetric.geolat(),
            &array![[0.0, 0.0, 0.0], [20.0, 20.0, 20.0], [40.0, 40.0, 40.0]]
        );
        assert_eq!(
            symmetric.dx().unwrap(),
            &array![[41.0, 45.0, 49.0], [41.0, 45.0, 49.0], [81.0, 85.0, 89.0]]
        );
        // dy rows (0,1) and (2,3), columns 2, 4, 6
        assert_eq!(
            symmetric.dy().unwrap(),
            &array![[14.0, 18.0, 22.0], [14.0, 18.0, 22.0], [54.0, 58.0, 62.0]]
        );
        assert_eq!(
            symmetric.geolon(),
            &array![[1.0, 3.0, 5.0], [1.0, 3.0, 5.0], [1.0, 3.0, 5.0]]
        );
        assert_eq!(
            symmetric.area(),
            &array![[20.0, 26.0, 34.0], [20.0, 26.0, 34.0], [100.0, 106.0, 114.0]]
        );

        let non_symmetric = supergrid.derive_metrics::<f64>(CellType::V, false).unwrap();
        assert_eq!(non_symmetric.shape(), (2, 3));
        assert_eq!(
            non_symmetric.geolat(),
            &array![[20.0, 20.0, 20.0], [40.0, 40.0, 40.0]]
        );
        assert_eq!(
            non_symmetric.dx().unwrap(),
            &array![[41.0, 45.0, 49.0], [81.0, 85.0, 89.0]]
        );
        assert_eq!(
            non_symmetric.dy().unwrap(),
            &array![[14.0, 18.0, 22.0], [54.0, 58.0, 62.0]]
        );
    }

    #[test]
    fn corner_metrics_have_no_widths() {
        let supergrid = indexed_supergrid();
        let symmetric = supergrid
            .derive_metrics::<f32>(CellType::Corner, true)
            .unwrap();
        assert_eq!(symmetric.shape(), (3, 4));
        assert!(symmetric.dx().is_none());
        assert!(symmetric.dy().is_none());
        assert_eq!(
            symmetric.area(),
            &array![
                [22.0_f32, 22.0, 30.0, 38.0],
                [22.0, 22.0, 30.0, 38.0],
                [102.0, 102.0, 110.0, 118.0]
            ]
        );

        let non_symmetric = supergrid
            .derive_metrics::<f32>(CellType::Corner, false)
            .unwrap();
        assert_eq!(non_symmetric.shape(), (2, 3));
        assert_eq!(non_symmetric.geolon(), &array![[2.0_f32, 4.0, 6.0], [2.0, 4.0, 6.0]]);
    }
}
