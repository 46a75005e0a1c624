//! Command execution layer
//!
//! This module contains the runner seam and the process-backed runner.

mod process;
mod traits;

pub use process::ProcessRunner;
pub use traits::{CommandInvocation, CommandResult, Runner};
