//! File input/output.

pub mod utils;

#[cfg(feature = "netcdf")]
pub mod netcdf;

/// Whether or not to print non-critical status messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbose {
    Yes,
    No,
}

impl Verbose {
    pub fn is_yes(&self) -> bool {
        match self {
            Verbose::Yes => true,
            Verbose::No => false,
        }
    }
}

impl From<bool> for Verbose {
    fn from(verbose: bool) -> Self {
        if verbose {
            Verbose::Yes
        } else {
            Verbose::No
        }
    }
}

impl Default for Verbose {
    fn default() -> Self {
        Verbose::No
    }
}
