//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host filesystem under `/host`; everything that reads or
//! writes files goes through [`paths`] to get sandbox-visible locations.

pub mod paths;

pub use paths::{data_dir, display_path, resolve_host_path};
