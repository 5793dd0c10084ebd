//! Core types used throughout the library.

pub mod repo;
pub mod request;
pub mod session;
pub mod streaming;

// Re-export commonly used types
pub use repo::*;
pub use request::*;
pub use session::*;
pub use streaming::*;
