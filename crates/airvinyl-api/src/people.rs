//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/people` | |
//! | `POST`   | `/people` | Body: [`NewPerson`], nested vinyl records allowed; 201 |
//! | `GET`    | `/people/:key` | 404 if not found |
//! | `PUT`    | `/people/:key` | Replaces every scalar; 204 |
//! | `PATCH`  | `/people/:key` | Body: [`PersonPatch`]; 204 |
//! | `DELETE` | `/people/:key` | Also drops the person's ratings; 204 |
//! | `GET`    | `/people/:key/vinyl-records[/:record]` | |
//! | `GET`    | `/people/:key/:property[/$value]` | See [`crate::property`] |

use std::sync::Arc;

use airvinyl_core::{
  person::{NewPerson, Person, PersonPatch, VinylRecord},
  store::EntityStore,
};
use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use tracing::info;

use crate::{error::ApiError, property};

async fn find<S: EntityStore>(store: &S, key: i64) -> Result<Person, ApiError> {
  store
    .get_person(key)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {key} not found")))
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S: EntityStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Person>>, ApiError> {
  let people = store.list_people().await.map_err(ApiError::store)?;
  Ok(Json(people))
}

/// `POST /people` — returns 201 + the stored person with assigned ids.
pub async fn create<S: EntityStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let person = store.add_person(body).await.map_err(ApiError::store)?;
  info!(person_id = person.person_id, "created person");
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Single person ────────────────────────────────────────────────────────────

/// `GET /people/:key`
pub async fn get_one<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
) -> Result<Json<Person>, ApiError> {
  Ok(Json(find(store.as_ref(), key).await?))
}

/// `PUT /people/:key` — the id in the URL wins over any id in the body.
pub async fn replace<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
  let mut person = find(store.as_ref(), key).await?;
  let Json(body) = body?;
  person.replace_scalars(body);
  save(store.as_ref(), person).await
}

/// `PATCH /people/:key`
pub async fn patch<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
  let mut person = find(store.as_ref(), key).await?;
  let Json(body) = body?;
  body.apply(&mut person);
  save(store.as_ref(), person).await
}

async fn save<S: EntityStore>(store: &S, person: Person) -> Result<StatusCode, ApiError> {
  let key = person.person_id;
  if store.update_person(person).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    // Deleted between the read and the write.
    Err(ApiError::NotFound(format!("person {key} not found")))
  }
}

/// `DELETE /people/:key`
pub async fn delete<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
) -> Result<StatusCode, ApiError> {
  if store.delete_person(key).await.map_err(ApiError::store)? {
    info!(person_id = key, "deleted person");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("person {key} not found")))
  }
}

// ─── Vinyl records ────────────────────────────────────────────────────────────

/// `GET /people/:key/vinyl-records`
pub async fn vinyl_records<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path(key): Path<i64>,
) -> Result<Json<Vec<VinylRecord>>, ApiError> {
  Ok(Json(find(store.as_ref(), key).await?.vinyl_records))
}

/// `GET /people/:key/vinyl-records/:record` — only records the person owns.
pub async fn vinyl_record<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path((key, record)): Path<(i64, i64)>,
) -> Result<Json<VinylRecord>, ApiError> {
  find(store.as_ref(), key)
    .await?
    .vinyl_records
    .into_iter()
    .find(|v| v.vinyl_record_id == record)
    .map(Json)
    .ok_or_else(|| {
      ApiError::NotFound(format!("vinyl record {record} not found for person {key}"))
    })
}

// ─── Properties ───────────────────────────────────────────────────────────────

/// `GET /people/:key/:property`
pub async fn get_property<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path((key, name)): Path<(i64, String)>,
) -> Result<Response, ApiError> {
  let person = find(store.as_ref(), key).await?;
  property::value_response(&person, &format!("person {key}"), &name)
}

/// `GET /people/:key/:property/$value`
pub async fn get_property_raw<S: EntityStore>(
  State(store): State<Arc<S>>,
  Path((key, name)): Path<(i64, String)>,
) -> Result<Response, ApiError> {
  let person = find(store.as_ref(), key).await?;
  property::raw_value_response(&person, &format!("person {key}"), &name)
}
