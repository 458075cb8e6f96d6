//! CLI commands for the allocation rule.

pub mod allocate;
pub mod show_config;

pub use allocate::{run_allocate, AllocateArgs};
pub use show_config::{run_show_config, ShowConfigArgs};
