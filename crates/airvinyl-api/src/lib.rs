//! JSON REST API for AirVinyl.
//!
//! Exposes an axum [`Router`] backed by any
//! [`airvinyl_core::store::EntityStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", airvinyl_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod people;
pub mod property;
pub mod record_stores;

use std::sync::Arc;

use airvinyl_core::store::EntityStore;
use axum::{
  Router,
  routing::{get, post},
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EntityStore + 'static,
{
  Router::new()
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{key}",
      get(people::get_one::<S>)
        .put(people::replace::<S>)
        .patch(people::patch::<S>)
        .delete(people::delete::<S>),
    )
    .route("/people/{key}/vinyl-records", get(people::vinyl_records::<S>))
    .route(
      "/people/{key}/vinyl-records/{record}",
      get(people::vinyl_record::<S>),
    )
    .route("/people/{key}/{property}", get(people::get_property::<S>))
    .route(
      "/people/{key}/{property}/$value",
      get(people::get_property_raw::<S>),
    )
    // Record stores
    .route("/record-stores", get(record_stores::list::<S>))
    .route(
      "/record-stores/are-rated-by",
      get(record_stores::are_rated_by::<S>),
    )
    .route(
      "/record-stores/specialized",
      get(record_stores::specialized_list::<S>),
    )
    .route(
      "/record-stores/remove-ratings",
      post(record_stores::remove_ratings::<S>),
    )
    .route("/record-stores/{key}", get(record_stores::get_one::<S>))
    .route(
      "/record-stores/{key}/is-high-rated",
      get(record_stores::is_high_rated::<S>),
    )
    .route("/record-stores/{key}/rate", post(record_stores::rate::<S>))
    .route(
      "/record-stores/{key}/specialized",
      get(record_stores::specialized_one::<S>),
    )
    .route(
      "/record-stores/{key}/{property}",
      get(record_stores::get_property::<S>),
    )
    // Unbound function and action
    .route(
      "/high-rated-record-stores",
      get(record_stores::high_rated::<S>),
    )
    .route(
      "/remove-record-store-ratings",
      post(record_stores::remove_record_store_ratings::<S>),
    )
    .with_state(store)
}
