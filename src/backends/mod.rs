//! Backend implementations for the documentation generation service.

pub mod http;

// Re-export the default implementation
pub use http::CodemythBackend;
