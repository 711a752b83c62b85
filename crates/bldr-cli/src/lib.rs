//! bldr library - expose modules for testing
//!
//! The `bldr` binary is a thin package manager hook. This library holds the
//! command implementations so they can be exercised from tests.

pub mod commands;
pub mod common;
pub mod context;
pub mod errors;

pub use bldr_logger as logger;
pub use common::GlobalOpts;
