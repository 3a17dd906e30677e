//! Breakwell client core.
//!
//! Headless orchestration layer for the wellness backend: typed service
//! wrappers per endpoint, client-side break execution tracking with a
//! countdown timer, check-in cadence resolution, and the dashboard
//! aggregation that merges concurrent fetches under an asymmetric failure
//! policy. All analysis (stress scoring, break and media curation) happens
//! server-side; this crate submits, fetches, and tracks.

pub mod cadence;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod executor;
pub mod http;
pub mod notification;
pub mod services;
pub mod session;
pub mod storage;
pub mod timer;
pub mod tracker;
pub mod types;

pub use error::{ClientError, Result};
pub use http::ApiClient;
