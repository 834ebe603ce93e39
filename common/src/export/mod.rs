//! Export core modules shared by the CLI exporters.

pub mod csv_core;

#[cfg(feature = "excel")]
pub mod excel_core;
