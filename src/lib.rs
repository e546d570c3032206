//! Ad-hoc reachability check for the EPG icon and channel endpoints, meant to
//! run inside a CI job: probe each target once, write a JSON report, and exit
//! non-zero if anything was unreachable.

pub mod config;
pub mod engine;
#[cfg(feature = "markers")]
pub mod markers;
pub mod models;
pub mod utils;
