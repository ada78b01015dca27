//! Container lifecycle automation: stop, rebuild or pull, restart, prune.

pub mod config;
pub mod docker;
pub mod lifecycle;
pub mod runtime;

pub use runtime::ContainerRuntime;
