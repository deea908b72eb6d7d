//! API request handlers.

mod clean;

pub use clean::*;
