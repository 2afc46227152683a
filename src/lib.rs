//! Look up the tasks of a pipeline, either on a Tekton cluster (through
//! `kubectl`) or in a local YAML file, and shape them for display.

pub mod backends;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod lookup;
pub mod output;
pub mod pipeline;
pub mod plugins;
pub mod store;

pub use error::{Error, Result};
