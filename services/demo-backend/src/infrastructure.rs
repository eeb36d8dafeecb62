// Infrastructure layer modules
pub mod clock;
pub mod logging;
pub mod service_config;

// Re-exports
pub use clock::{format_timestamp, now_timestamp};
pub use logging::init_logging;
pub use service_config::{ServiceConfig, DEFAULT_ENVIRONMENT};
