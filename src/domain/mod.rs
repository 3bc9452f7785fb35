pub mod signup;

pub use signup::*;
