//! fapmix: command line and node registry for the fap mixing pipelines.
//!
//! - [`cli`] - clap definitions and dispatch
//! - [`mix`] / [`premix`] - subcommands running one pipeline each
//! - [`nodes`] - named pipeline entry points with declared inputs and outputs

pub mod cli;
pub mod mix;
pub mod nodes;
pub mod premix;
