//! The rating aggregation and mutation engine.
//!
//! [`aggregate`] holds the read side; it never stages or commits anything.
//! [`mutate`] stages rating changes on a [`UnitOfWork`](crate::store::UnitOfWork)
//! and issues exactly one commit per operation.

pub mod aggregate;
pub mod mutate;

pub use aggregate::{
  are_rated_by, get_high_rated_record_stores, high_rated, is_high_rated,
  rated_by,
};
pub use mutate::{
  rate, rate_with, remove_ratings, remove_ratings_by_person,
  remove_record_store_ratings,
};
