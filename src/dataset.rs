//! In-memory labeled array collections mirroring the layout of NetCDF files.

use ndarray::prelude::*;
use std::io;

/// Named array of values laid out along named dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: String,
    dimensions: Vec<String>,
    values: ArrayD<f64>,
}

/// Collection of named dimensions and variables defined on them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    dimensions: Vec<(String, usize)>,
    variables: Vec<Variable>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the dimensions of the variable, outermost first.
    pub fn dimensions(&self) -> Vec<&str> {
        self.dimensions.iter().map(|s| s.as_str()).collect()
    }

    pub fn values(&self) -> ArrayViewD<f64> {
        self.values.view()
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dimension with the given length.
    ///
    /// Adding a dimension that already exists is only allowed if the lengths agree.
    pub fn add_dimension<S: AsRef<str>>(&mut self, name: S, len: usize) -> io::Result<()> {
        let name = name.as_ref();
        match self.dimension_len(name) {
            Some(existing_len) if existing_len == len => Ok(()),
            Some(existing_len) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Dimension {} already has length {}, cannot redefine with length {}",
                    name, existing_len, len
                ),
            )),
            None => {
                self.dimensions.push((name.to_string(), len));
                Ok(())
            }
        }
    }

    /// Adds a variable with the given dimensions, replacing any variable with the same name.
    ///
    /// Missing dimensions are created from the shape of the values.
    pub fn add_variable<S, D>(&mut self, name: S, dimensions: &[D], values: ArrayD<f64>) -> io::Result<()>
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        let name = name.as_ref();
        if dimensions.len() != values.ndim() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Variable {} has {} dimension names but {}D values",
                    name,
                    dimensions.len(),
                    values.ndim()
                ),
            ));
        }
        for (idx, (dimension, &len)) in dimensions.iter().zip(values.shape()).enumerate() {
            let dimension = dimension.as_ref();
            let earlier_len = dimensions[..idx]
                .iter()
                .zip(values.shape())
                .find(|(earlier, _)| earlier.as_ref() == dimension)
                .map(|(_, &earlier_len)| earlier_len);
            match earlier_len.or_else(|| self.dimension_len(dimension)) {
                Some(existing_len) if existing_len != len => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "Variable {} has length {} along dimension {}, which has length {}",
                            name, len, dimension, existing_len
                        ),
                    ))
                }
                _ => {}
            }
        }
        for (dimension, &len) in dimensions.iter().zip(values.shape()) {
            self.add_dimension(dimension, len)?;
        }

        let variable = Variable {
            name: name.to_string(),
            dimensions: dimensions.iter().map(|d| d.as_ref().to_string()).collect(),
            values,
        };
        match self.variables.iter_mut().find(|var| var.name == name) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
        Ok(())
    }

    /// Adds a 2D variable defined on the given pair of dimensions.
    pub fn add_variable_2d<S, D>(
        &mut self,
        name: S,
        dimensions: [D; 2],
        values: Array2<f64>,
    ) -> io::Result<()>
    where
        S: AsRef<str>,
        D: AsRef<str>,
    {
        self.add_variable(name, &dimensions[..], values.into_dyn())
    }

    /// Copies the given variable from another dataset, optionally under a new name.
    pub fn copy_variable_from(&mut self, other: &Dataset, name: &str, new_name: &str) -> io::Result<()> {
        let variable = other.require_variable(name)?;
        self.add_variable(
            new_name,
            variable.dimensions.as_slice(),
            variable.values.clone(),
        )
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name == name)
    }

    /// Returns the variable with the given name, or a `NotFound` error.
    pub fn require_variable(&self, name: &str) -> io::Result<&Variable> {
        self.variable(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Variable {} not found in dataset", name),
            )
        })
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    /// Whether every one of the given names is a variable in the dataset.
    pub fn has_variables(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.has_variable(name))
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|var| var.name.as_str()).collect()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|(dim_name, _)| dim_name == name)
            .map(|&(_, len)| len)
    }

    /// Returns the length of the given dimension, or a `NotFound` error.
    pub fn require_dimension_len(&self, name: &str) -> io::Result<usize> {
        self.dimension_len(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Dimension {} not found in dataset", name),
            )
        })
    }

    /// Names and lengths of all dimensions, in insertion order.
    pub fn dimensions(&self) -> &[(String, usize)] {
        &self.dimensions
    }

    /// Returns the values of the given 2D variable.
    pub fn variable_values_2d(&self, name: &str) -> io::Result<Array2<f64>> {
        let variable = self.require_variable(name)?;
        variable
            .values
            .view()
            .into_dimensionality::<Ix2>()
            .map(|values| values.to_owned())
            .map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Variable {} is {}D, expected 2D",
                        name,
                        variable.values.ndim()
                    ),
                )
            })
    }
}
