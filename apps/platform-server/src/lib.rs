//! Tablewise platform server: configuration loading and application
//! assembly. The binary in `main.rs` only parses arguments and serves.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod config;

pub use app::{build_router, connect, migrate};
pub use config::AppConfig;
