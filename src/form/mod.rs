//! Explicit form state: values, errors, touched fields and the in-flight flag.

pub mod state;

pub use state::*;
