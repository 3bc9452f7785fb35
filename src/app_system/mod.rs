//! System orchestration, startup, and shutdown logic.

pub mod signup_system;
pub mod tracing;

pub use signup_system::*;
pub use self::tracing::*;
