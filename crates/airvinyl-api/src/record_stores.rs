//! Handlers for record stores and the rating functions and actions.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/record-stores` | |
//! | `GET`  | `/record-stores/:key` | 404 if not found |
//! | `GET`  | `/record-stores/:key/:property` | See [`crate::property`] |
//! | `GET`  | `/record-stores/:key/is-high-rated?minimumRating=` | `bool` |
//! | `GET`  | `/record-stores/are-rated-by?personIds=1,2` | |
//! | `GET`  | `/high-rated-record-stores?minimumRating=` | Sorted by id |
//! | `POST` | `/record-stores/:key/rate` | Body `{"rating":..,"personId":..}`; `bool` |
//! | `POST` | `/record-stores/remove-ratings` | Body `{"personId":..}`; `bool` |
//! | `POST` | `/remove-record-store-ratings` | Body `{"personId":..}`; 204, or 500 if nothing changed |
//! | `GET`  | `/record-stores/specialized` | |
//! | `GET`  | `/record-stores/:key/specialized` | 404 if missing or not specialized |
//!
//! Unreadable bodies and query strings are 400s with the usual JSON error
//! body.

use std::sync::Arc;

use airvinyl_core::{
  parameters::ActionParameters,
  ratings,
  record_store::RecordStore,
  specialization::{self, SpecializedLookup},
  store::EntityStore,
};
use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::Response,
};
use serde::Deserialize;

use crate::{error::ApiError, property};

async fn find<S: EntityStore>(store: &S, key: i64) -> Result<RecordStore, ApiError> {
  store
    .get_record_store(key)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("record store {key} not found")))
}

// ─── Entity set ───────────────────────────────────────────────────────────────

/// `GET /record-stores`
pub async fn list<S: EntityStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<RecordStore>>, ApiError> {
  let stores = store.list_record_stores().await.map_err(ApiError::store)?;
  Ok(Json(stores))
}

/// `GET /record-stores/:key`
pub async fn get_one<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
) -> Result<Json<RecordStore>, ApiError> {
  Ok(Json(find(store.as_ref(), key).await?))
}

/// `GET /record-stores/:key/:property`
pub async fn get_property<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path((key, name)): Path<(i64, String)>,
) -> Result<Response, ApiError> {
  let record_store = find(store.as_ref(), key).await?;
  property::value_response(&record_store, &format!("record store {key}"), &name)
}

// ─── Functions ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumRatingParams {
  pub minimum_rating: i32,
}

/// `GET /record-stores/:key/is-high-rated?minimumRating=<n>`
pub async fn is_high_rated<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
  query: Result<Query<MinimumRatingParams>, QueryRejection>,
) -> Result<Json<bool>, ApiError> {
  match query {
    Ok(Query(params)) => {
      let high =
        ratings::is_high_rated(store.as_ref(), key, params.minimum_rating).await?;
      Ok(Json(high))
    }
    Err(rejection) => {
      // A missing store wins over a malformed threshold.
      find(store.as_ref(), key).await?;
      Err(rejection.into())
    }
  }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatedByParams {
  /// Comma-separated person ids.
  #[serde(default)]
  pub person_ids: String,
}

impl RatedByParams {
  fn ids(&self) -> Result<Vec<i64>, ApiError> {
    self
      .person_ids
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(|s| {
        s.parse()
          .map_err(|_| ApiError::BadRequest(format!("invalid person id {s:?}")))
      })
      .collect()
  }
}

/// `GET /record-stores/are-rated-by?personIds=<id>[,<id>...]`
pub async fn are_rated_by<S: EntityStore>(
  State(store): State<Arc<S>>,
  query: Result<Query<RatedByParams>, QueryRejection>,
) -> Result<Json<Vec<RecordStore>>, ApiError> {
  let Query(params) = query?;
  let ids = params.ids()?;
  Ok(Json(ratings::are_rated_by(store.as_ref(), &ids).await?))
}

/// `GET /high-rated-record-stores?minimumRating=<n>`
pub async fn high_rated<S: EntityStore>(
  State(store): State<Arc<S>>,
  query: Result<Query<MinimumRatingParams>, QueryRejection>,
) -> Result<Json<Vec<RecordStore>>, ApiError> {
  let Query(params) = query?;
  let stores =
    ratings::get_high_rated_record_stores(store.as_ref(), params.minimum_rating)
      .await?;
  Ok(Json(stores))
}

// ─── Actions ──────────────────────────────────────────────────────────────────

/// `POST /record-stores/:key/rate` — `false` means the commit changed nothing.
pub async fn rate<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
  body: Result<Json<ActionParameters>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
  match body {
    Ok(Json(params)) => Ok(Json(ratings::rate(store.as_ref(), key, &params).await?)),
    Err(rejection) => {
      // Report a missing store before an unreadable body.
      find(store.as_ref(), key).await?;
      Err(rejection.into())
    }
  }
}

/// `POST /record-stores/remove-ratings`
pub async fn remove_ratings<S: EntityStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<ActionParameters>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
  let Json(params) = body?;
  Ok(Json(ratings::remove_ratings(store.as_ref(), &params).await?))
}

/// `POST /remove-record-store-ratings`
pub async fn remove_record_store_ratings<S: EntityStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<ActionParameters>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
  let Json(params) = body?;
  ratings::remove_record_store_ratings(store.as_ref(), &params).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Specialized variant ──────────────────────────────────────────────────────

/// `GET /record-stores/specialized`
pub async fn specialized_list<S: EntityStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<RecordStore>>, ApiError> {
  Ok(Json(specialization::specialized_record_stores(store.as_ref()).await?))
}

/// `GET /record-stores/:key/specialized`
pub async fn specialized_one<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
) -> Result<Json<RecordStore>, ApiError> {
  match specialization::specialized_record_store(store.as_ref(), key).await? {
    SpecializedLookup::Specialized(s) => Ok(Json(s)),
    SpecializedLookup::NotSpecialized => Err(ApiError::NotFound(format!(
      "record store {key} is not a specialized record store"
    ))),
    SpecializedLookup::NotFound => {
      Err(ApiError::NotFound(format!("record store {key} not found")))
    }
  }
}
