//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Output sink selection (stdout or a generated file)
//! - Exit codes mapped from the error taxonomy

pub mod exit_code;
pub mod sink;

pub use exit_code::ExitCode;
pub use sink::{open_sink, output_path};
