//! Rendering of the form: inputs, inline errors and the submit control.

pub mod view;

pub use view::*;
