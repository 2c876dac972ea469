//! Document fetching and the Fetch Stage.
//!
//! This crate provides:
//! - [`engine`]: the bounded [`WorkerPool`] each stage runs on
//! - [`http`]: [`HttpSource`], the reqwest/scraper-backed document source
//! - [`fetch`]: the Fetch Stage, turning detail tasks into persisted content

pub mod engine;
pub mod fetch;
pub mod http;

pub use engine::WorkerPool;
pub use fetch::{FetchOutcome, run_fetch_stage};
pub use http::HttpSource;
