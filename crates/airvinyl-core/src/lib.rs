//! Core types and logic for the AirVinyl catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the entity types, the by-name property accessor, and the rating
//! aggregation and mutation engine. Storage backends implement
//! [`store::EntityStore`]; the request layer calls the free functions in
//! [`ratings`] and [`specialization`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod parameters;
pub mod person;
pub mod property;
pub mod ratings;
pub mod record_store;
pub mod specialization;
pub mod store;

#[cfg(test)]
mod memory;

pub use error::{Error, Result};
