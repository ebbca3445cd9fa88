//! Configuration module for Seedsift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Running without a file falls back to [`Config::default`], which registers the
//! built-in site list.
//!
//! # Example
//!
//! ```no_run
//! use seedsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seedsift.toml")).unwrap();
//! println!("Searching {} sites", config.sites.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
