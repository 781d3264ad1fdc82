//! Error types for `airvinyl-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A referenced entity id does not exist.
  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  /// A missing, malformed or out-of-range parameter.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// A commit that was required to change rows changed none.
  #[error("the commit did not change any rows")]
  NotApplied,

  /// The entity store failed; never retried here.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn record_store_not_found(id: i64) -> Self {
    Self::NotFound { entity: "record store", id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
