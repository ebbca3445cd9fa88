//! Fetch module for all outbound HTTP traffic
//!
//! This module contains:
//! - The reqwest client with Seedsift's fixed header set
//! - The fixed-backoff retry policy applied to search page fetches
//! - The single-shot fetch used for detail pages

mod client;
mod retry;

pub use client::{build_http_client, FetchClient};
pub use retry::RetryPolicy;
