//! Export core modules shared across the CLI and library users.

#[cfg(feature = "excel")]
pub mod excel_core;
