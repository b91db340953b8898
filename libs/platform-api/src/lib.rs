//! HTTP API helpers shared by every module's REST surface.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod problem;

pub use problem::{ApiResult, Problem};
