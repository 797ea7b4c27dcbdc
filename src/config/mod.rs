//! Configuration Module
//!
//! Loads and validates configuration from environment variables.

pub mod loader;

pub use loader::{Config, ConfigError, GatewaySection, CacheSection, QuerySection};
