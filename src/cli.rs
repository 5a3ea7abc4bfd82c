//! Command line interface.

pub mod build;
pub mod derive;
pub mod inspect;
pub mod regrid_input;
pub mod run;
pub mod utils;
