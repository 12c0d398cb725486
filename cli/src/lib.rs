//! CLI utilities for facedb tools.
//!
//! This crate provides the configuration contexts and output helpers shared by
//! the dataset command line tools.

pub mod config;
pub mod output;

pub use config::{load_config, read_config, Config, Context};
pub use output::{print_success, print_verbose, print_warning, Output, OutputFormat};
