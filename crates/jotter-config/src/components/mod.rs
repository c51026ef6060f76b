//! Component configurations
//!
//! Each component of the note form owns a small config section.

mod cache;
mod form;
mod monitoring;
mod store;

pub use cache::CacheComponentConfig;
pub use form::{FormComponentConfig, ValidationComponentConfig};
pub use monitoring::{LogFormat, LoggingComponentConfig};
pub use store::StoreComponentConfig;
