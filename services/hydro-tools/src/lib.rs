//! Drainage density and flow-direction preparation tools.
//!
//! Each subcommand of the `hydro-tools` binary is a `run` function in
//! [`commands`]; tunables come from [`config::ToolsConfig`].

pub mod commands;
pub mod config;

pub use config::ToolsConfig;
