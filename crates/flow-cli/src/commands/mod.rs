//! Command implementations for flow-cli

pub mod basic;
pub mod process;
pub mod upload;

pub use basic::{health, test};
pub use process::process;
pub use upload::upload;
