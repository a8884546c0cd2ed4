//! Core types and trait definitions for Precinct, the residential-society
//! administration service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod announcement;
pub mod error;
pub mod society;
pub mod store;
pub mod user;

pub use error::{Error, ErrorKind, Result, StoreError};
