//! Command implementations for mtexport-cli

pub mod convert;
pub mod inspect;

pub use convert::{ConvertArgs, run_convert};
pub use inspect::run_inspect;
