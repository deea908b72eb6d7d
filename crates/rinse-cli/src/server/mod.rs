//! HTTP API for the cleaning pipeline.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
