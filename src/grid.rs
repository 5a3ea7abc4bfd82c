//! Horizontal grid metrics for the staggered cell types of an ocean model.

pub mod static_grid;
pub mod supergrid;

use crate::{
    dataset::Dataset,
    detection::{self, GridFileFormat},
    io::{utils as io_utils, Verbose},
    num::{self as mnum, GridFloat},
};
use ndarray::prelude::*;
use std::{
    fmt, io,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use static_grid::read_static_metrics;
pub use supergrid::Supergrid;

/// Names of the dimensions of exported grids.
pub const Y_CENTER_DIM: &str = "yh";
pub const X_CENTER_DIM: &str = "xh";
pub const Y_CORNER_DIM: &str = "yq";
pub const X_CORNER_DIM: &str = "xq";

const IN_MEMORY_SOURCE: &str = "in-memory dataset";

/// Location of a grid point within the staggered (Arakawa C) cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Tracer points at the cell centers.
    Center,
    /// Zonal velocity points on the eastern cell faces.
    U,
    /// Meridional velocity points on the northern cell faces.
    V,
    /// Vorticity points at the cell corners.
    Corner,
}

impl CellType {
    pub const ALL: [CellType; 4] = [CellType::Center, CellType::U, CellType::V, CellType::Corner];

    /// Suffix of the coordinate and area variable names for this cell type.
    pub fn suffix(&self) -> &'static str {
        match self {
            CellType::Center => "",
            CellType::U => "_u",
            CellType::V => "_v",
            CellType::Corner => "_c",
        }
    }

    /// Name of the cell area variable in ocean static files.
    pub fn static_area_name(&self) -> &'static str {
        match self {
            CellType::Center => "areacello",
            CellType::U => "areacello_cu",
            CellType::V => "areacello_cv",
            CellType::Corner => "areacello_bu",
        }
    }

    /// Names of the x- and y-width variables in ocean static files, if the
    /// cell type has any.
    pub fn width_names(&self) -> Option<(&'static str, &'static str)> {
        match self {
            CellType::Center => Some(("dxt", "dyt")),
            CellType::U => Some(("dxCu", "dyCu")),
            CellType::V => Some(("dxCv", "dyCv")),
            CellType::Corner => None,
        }
    }

    /// Names of the (y, x) dimensions the cell type is defined on.
    pub fn dimension_names(&self) -> [&'static str; 2] {
        match self {
            CellType::Center => [Y_CENTER_DIM, X_CENTER_DIM],
            CellType::U => [Y_CENTER_DIM, X_CORNER_DIM],
            CellType::V => [Y_CORNER_DIM, X_CENTER_DIM],
            CellType::Corner => [Y_CORNER_DIM, X_CORNER_DIM],
        }
    }

    pub fn longitude_name(&self) -> String {
        format!("geolon{}", self.suffix())
    }

    pub fn latitude_name(&self) -> String {
        format!("geolat{}", self.suffix())
    }

    pub fn area_name(&self) -> String {
        format!("areacello{}", self.suffix())
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CellType::Center => "tracer",
                CellType::U => "u",
                CellType::V => "v",
                CellType::Corner => "corner",
            }
        )
    }
}

impl FromStr for CellType {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "t" | "tracer" | "center" | "h" => Ok(CellType::Center),
            "u" => Ok(CellType::U),
            "v" => Ok(CellType::V),
            "c" | "corner" | "q" => Ok(CellType::Corner),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid grid type {} (must be one of t, u, v, c)", s),
            )),
        }
    }
}

/// Coordinates, area and (where defined) widths of the cells of one type.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMetrics<F: GridFloat> {
    geolon: Array2<F>,
    geolat: Array2<F>,
    area: Array2<F>,
    widths: Option<(Array2<F>, Array2<F>)>,
}

impl<F: GridFloat> CellMetrics<F> {
    /// Bundles the given metrics, verifying that all arrays have the same shape.
    pub fn new(
        geolon: Array2<F>,
        geolat: Array2<F>,
        area: Array2<F>,
        widths: Option<(Array2<F>, Array2<F>)>,
    ) -> io::Result<Self> {
        let shape = geolon.dim();
        let mut shapes = vec![("latitude", geolat.dim()), ("area", area.dim())];
        if let Some((dx, dy)) = &widths {
            shapes.push(("x-width", dx.dim()));
            shapes.push(("y-width", dy.dim()));
        }
        if let Some((name, other_shape)) = shapes.into_iter().find(|(_, s)| *s != shape) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Shape {:?} of cell {} differs from shape {:?} of cell longitude",
                    other_shape, name, shape
                ),
            ));
        }
        Ok(Self {
            geolon,
            geolat,
            area,
            widths,
        })
    }

    pub fn geolon(&self) -> &Array2<F> {
        &self.geolon
    }

    pub fn geolat(&self) -> &Array2<F> {
        &self.geolat
    }

    pub fn area(&self) -> &Array2<F> {
        &self.area
    }

    pub fn dx(&self) -> Option<&Array2<F>> {
        self.widths.as_ref().map(|(dx, _)| dx)
    }

    pub fn dy(&self) -> Option<&Array2<F>> {
        self.widths.as_ref().map(|(_, dy)| dy)
    }

    /// Number of (y, x) points.
    pub fn shape(&self) -> (usize, usize) {
        self.geolon.dim()
    }
}

/// Named model configurations with a known grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownConfig {
    OM4,
    OM4p5,
}

impl KnownConfig {
    pub fn description(&self) -> &'static str {
        match self {
            KnownConfig::OM4 => "Default OM4 grid",
            KnownConfig::OM4p5 => "Default OM4p5 grid",
        }
    }
}

/// Where to obtain the grid information from.
#[derive(Clone, Debug)]
pub enum GridSource {
    /// An already loaded supergrid or static dataset.
    Dataset(Dataset),
    /// Path to an `ocean_hgrid.nc` or `ocean_static.nc` file.
    File(PathBuf),
    /// A named model configuration.
    Known(KnownConfig),
}

impl GridSource {
    /// Interprets the given string as a path to an existing file or the name
    /// of a known configuration.
    pub fn parse(source: &str) -> io::Result<Self> {
        let path = Path::new(source);
        if path.exists() {
            Ok(GridSource::File(io_utils::absolute_path(path)?))
        } else if source == "OM4" {
            Ok(GridSource::Known(KnownConfig::OM4))
        } else if source == "OM4p5" {
            Ok(GridSource::Known(KnownConfig::OM4p5))
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown source: {}", source),
            ))
        }
    }

    /// Human readable description of the source.
    pub fn description(&self) -> String {
        match self {
            GridSource::Dataset(_) => IN_MEMORY_SOURCE.to_string(),
            GridSource::File(path) => path.display().to_string(),
            GridSource::Known(config) => config.description().to_string(),
        }
    }

    /// Loads the dataset the source refers to.
    pub fn load(self, verbose: Verbose) -> io::Result<Dataset> {
        match self {
            GridSource::Dataset(ds) => Ok(ds),
            GridSource::File(path) => load_file(&path, verbose),
            GridSource::Known(config) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("Loading the {} is not supported", config.description()),
            )),
        }
    }
}

impl From<Dataset> for GridSource {
    fn from(ds: Dataset) -> Self {
        GridSource::Dataset(ds)
    }
}

#[cfg(feature = "netcdf")]
fn load_file(path: &Path, verbose: Verbose) -> io::Result<Dataset> {
    crate::io::netcdf::read_dataset(path, verbose)
}

#[cfg(not(feature = "netcdf"))]
fn load_file(path: &Path, _verbose: Verbose) -> io::Result<Dataset> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "Cannot read {}: reading grid files requires the `netcdf` feature",
            path.display()
        ),
    ))
}

/// Configuration parameters for grid construction.
#[derive(Clone, Copy, Debug)]
pub struct MomGridConfig {
    /// Whether to produce metrics for symmetric memory mode.
    symmetric: bool,
    /// Whether to print status messages.
    verbose: Verbose,
}

impl MomGridConfig {
    pub fn new(symmetric: bool, verbose: Verbose) -> Self {
        Self { symmetric, verbose }
    }

    pub fn symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn verbose(&self) -> Verbose {
        self.verbose
    }
}

impl Default for MomGridConfig {
    fn default() -> Self {
        Self::new(true, Verbose::No)
    }
}

/// Grid metrics for the tracer, u, v and corner points of an ocean model grid.
///
/// `F` is the precision of the metrics. Metrics derived from a supergrid are
/// computed in double precision and then converted.
#[derive(Clone, Debug)]
pub struct MomGrid<F: GridFloat> {
    source: String,
    format: GridFileFormat,
    symmetric: bool,
    center: CellMetrics<F>,
    u: CellMetrics<F>,
    v: CellMetrics<F>,
    corner: CellMetrics<F>,
}

impl<F: GridFloat> MomGrid<F> {
    /// Constructs the grid from the given source.
    pub fn new<S: Into<GridSource>>(source: S, config: MomGridConfig) -> io::Result<Self> {
        let source = source.into();
        let description = source.description();
        let ds = source.load(config.verbose())?;
        Self::from_dataset_with_description(&ds, description, config)
    }

    /// Constructs the grid from a supergrid or static dataset.
    pub fn from_dataset(ds: &Dataset, config: MomGridConfig) -> io::Result<Self> {
        Self::from_dataset_with_description(ds, IN_MEMORY_SOURCE.to_string(), config)
    }

    fn from_dataset_with_description(
        ds: &Dataset,
        source: String,
        config: MomGridConfig,
    ) -> io::Result<Self> {
        let format = detection::detect_format(ds);
        if format == GridFileFormat::Neither {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} is neither a supergrid nor a static grid (expected variables {} or {})",
                    source,
                    detection::SUPERGRID_VARIABLE_NAMES.join(", "),
                    detection::STATIC_VARIABLE_NAMES.join(", ")
                ),
            ));
        }

        let symmetric = if format.has_static() {
            let file_symmetric = detection::is_symmetric(ds)?;
            if file_symmetric != config.symmetric() {
                eprintln!(
                    "Warning: Supplied static file inconsistent with requested memory mode, using {} mode",
                    memory_mode_name(file_symmetric)
                );
            }
            file_symmetric
        } else {
            config.symmetric()
        };

        let [center, u, v, corner] = if format.has_static() {
            if config.verbose().is_yes() {
                println!("Reading grid metrics from static file {}", source);
            }
            [
                read_static_metrics(ds, CellType::Center)?,
                read_static_metrics(ds, CellType::U)?,
                read_static_metrics(ds, CellType::V)?,
                read_static_metrics(ds, CellType::Corner)?,
            ]
        } else {
            let supergrid = Supergrid::from_dataset(ds)?;
            if config.verbose().is_yes() {
                let (nj, ni) = supergrid.tracer_shape();
                println!(
                    "Deriving {}x{} grid metrics in {} mode from supergrid {}",
                    nj,
                    ni,
                    memory_mode_name(symmetric),
                    source
                );
            }
            [
                supergrid.derive_metrics(CellType::Center, symmetric)?,
                supergrid.derive_metrics(CellType::U, symmetric)?,
                supergrid.derive_metrics(CellType::V, symmetric)?,
                supergrid.derive_metrics(CellType::Corner, symmetric)?,
            ]
        };

        Ok(Self {
            source,
            format,
            symmetric,
            center,
            u,
            v,
            corner,
        })
    }

    /// Description of where the grid was obtained from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Detected layout of the source dataset.
    pub fn format(&self) -> GridFileFormat {
        self.format
    }

    /// Whether the metrics were obtained from a supergrid.
    pub fn is_supergrid(&self) -> bool {
        self.format.has_supergrid()
    }

    /// Whether the metrics were obtained from a static file.
    pub fn is_static(&self) -> bool {
        self.format.has_static()
    }

    /// Whether the metrics follow symmetric memory mode.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn metrics(&self, cell_type: CellType) -> &CellMetrics<F> {
        match cell_type {
            CellType::Center => &self.center,
            CellType::U => &self.u,
            CellType::V => &self.v,
            CellType::Corner => &self.corner,
        }
    }

    pub fn center(&self) -> &CellMetrics<F> {
        &self.center
    }

    pub fn u(&self) -> &CellMetrics<F> {
        &self.u
    }

    pub fn v(&self) -> &CellMetrics<F> {
        &self.v
    }

    pub fn corner(&self) -> &CellMetrics<F> {
        &self.corner
    }

    /// Assembles the metrics into a dataset on the `yh`, `xh`, `yq` and `xq`
    /// dimensions.
    pub fn to_dataset(&self) -> io::Result<Dataset> {
        let mut ds = Dataset::new();
        let (ny, nx) = self.center.shape();
        let (nyq, nxq) = self.corner.shape();
        ds.add_dimension(Y_CENTER_DIM, ny)?;
        ds.add_dimension(X_CENTER_DIM, nx)?;
        ds.add_dimension(Y_CORNER_DIM, nyq)?;
        ds.add_dimension(X_CORNER_DIM, nxq)?;

        for cell_type in CellType::ALL {
            let metrics = self.metrics(cell_type);
            let dims = cell_type.dimension_names();
            ds.add_variable_2d(cell_type.longitude_name(), dims, mnum::widen(metrics.geolon().view()))?;
            ds.add_variable_2d(cell_type.latitude_name(), dims, mnum::widen(metrics.geolat().view()))?;
            ds.add_variable_2d(cell_type.area_name(), dims, mnum::widen(metrics.area().view()))?;

            if let (Some((dx_name, dy_name)), Some((dx, dy))) =
                (cell_type.width_names(), metrics.widths.as_ref())
            {
                ds.add_variable_2d(dx_name, dims, mnum::widen(dx.view()))?;
                ds.add_variable_2d(dy_name, dims, mnum::widen(dy.view()))?;
            }
        }
        Ok(ds)
    }
}

fn memory_mode_name(symmetric: bool) -> &'static str {
    if symmetric {
        "symmetric"
    } else {
        "non-symmetric"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn cell_types_parse_from_short_names() {
        assert_eq!("t".parse::<CellType>().unwrap(), CellType::Center);
        assert_eq!("U".parse::<CellType>().unwrap(), CellType::U);
        assert_eq!("v".parse::<CellType>().unwrap(), CellType::V);
        assert_eq!("c".parse::<CellType>().unwrap(), CellType::Corner);
        assert!("x".parse::<CellType>().is_err());
    }

    #[test]
    fn cell_type_names_follow_static_file_conventions() {
        assert_eq!(CellType::Center.longitude_name(), "geolon");
        assert_eq!(CellType::U.latitude_name(), "geolat_u");
        assert_eq!(CellType::Corner.area_name(), "areacello_c");
        assert_eq!(CellType::Corner.static_area_name(), "areacello_bu");
        assert_eq!(CellType::V.width_names(), Some(("dxCv", "dyCv")));
        assert_eq!(CellType::Corner.width_names(), None);
        assert_eq!(CellType::U.dimension_names(), ["yh", "xq"]);
    }

    #[test]
    fn cell_metrics_require_equal_shapes() {
        let err = CellMetrics::<f32>::new(
            Array2::zeros((2, 3)),
            Array2::zeros((2, 3)),
            Array2::zeros((3, 3)),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn known_configurations_are_recognized_but_not_loadable() {
        let source = GridSource::parse("OM4p5").unwrap();
        assert_eq!(source.description(), "Default OM4p5 grid");
        assert_eq!(
            MomGrid::<f32>::new(source, MomGridConfig::default())
                .unwrap_err()
                .kind(),
            io::ErrorKind::Unsupported
        );
        assert_eq!(
            GridSource::parse("no/such/grid.nc").unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }

    #[cfg(not(feature = "netcdf"))]
    #[test]
    fn grid_files_require_netcdf_support() {
        let source = GridSource::File(PathBuf::from("ocean_hgrid.nc"));
        assert_eq!(
            source.load(Verbose::No).unwrap_err().kind(),
            io::ErrorKind::Unsupported
        );
    }

    #[test]
    fn unrecognized_dataset_is_rejected() {
        let mut ds = Dataset::new();
        ds.add_variable_2d("temp", ["yh", "xh"], Array2::zeros((2, 2)))
            .unwrap();
        assert_eq!(
            MomGrid::<f64>::from_dataset(&ds, MomGridConfig::default())
                .unwrap_err()
                .kind(),
            io::ErrorKind::InvalidData
        );
    }
}
