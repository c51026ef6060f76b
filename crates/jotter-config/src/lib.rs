//! # Jotter Configuration Library
//!
//! Typed configuration for the note-creation form: validation thresholds,
//! form re-validation behaviour, the shared notes cache, the in-memory note
//! store, and logging.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jotter_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("jotter.toml").await?;
//!     assert!(config.validation.title_min_len > 0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod config;
mod error;
mod loader;

pub use components::{
    CacheComponentConfig, FormComponentConfig, LogFormat, LoggingComponentConfig,
    StoreComponentConfig, ValidationComponentConfig,
};
pub use config::JotterConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
