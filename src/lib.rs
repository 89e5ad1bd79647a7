// Library crate for scoreprobe
// Exports modules for use by the harness and promote-admin binaries and tests

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scenarios;
pub mod services;
pub mod session;
