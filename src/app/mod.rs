//! Application layer: setup and the command-line surface.

pub mod cli;
pub mod setup;
