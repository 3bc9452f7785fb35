//! The form service: owns one form's state and drives its submission.

pub mod service;

pub use service::*;
