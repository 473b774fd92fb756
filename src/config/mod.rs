//! Optional defaults file for the installer.
//!
//! The file is YAML, read from `--config <path>` or from
//! `<target>/.agents-setup.yaml` when present. Every field is optional and
//! unknown fields are ignored for forward compatibility. Command-line flags
//! override the file; its `values` sit between inferred values and `--set`.

mod model;
mod operations;


pub use model::{CONFIG_FILE_NAME, SetupConfig};
