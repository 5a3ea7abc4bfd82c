//! The `momgrid` crate derives ocean model grid metrics for the four staggered
//! cell types (tracer, u, v and corner points) from either a supergrid or a
//! static grid file.

#[macro_use]
mod error;

pub mod dataset;
pub mod detection;
pub mod grid;
pub mod io;
pub mod num;
pub mod regrid;

#[cfg(feature = "cli")]
pub mod cli;
