//! Core types and the publication lifecycle state machine for the larder
//! recipe backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it performs no I/O of its own.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod lifecycle;
pub mod recipe;
pub mod store;

pub use error::{Error, Result};
