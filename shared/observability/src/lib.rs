//! Observability for the storefront API.
//!
//! Provides tracing subscriber initialization (JSON or pretty formatting)
//! and an actix-web middleware that logs one structured line per request.

pub mod init;
pub mod middleware;

pub use init::*;
pub use middleware::*;

// Re-export tracing for convenience
pub use tracing::{debug, error, info, warn};
