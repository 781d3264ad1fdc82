//! Maps a property [`Lookup`] onto a response.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | not found | 404 |
//! | found, no value | 204 |
//! | found | 200, JSON value (or `text/plain` for the raw form) |

use airvinyl_core::property::{Lookup, Properties};
use axum::{
  Json,
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};

use crate::error::ApiError;

pub fn value_response<E: Properties>(
  entity: &E,
  owner: &str,
  name: &str,
) -> Result<Response, ApiError> {
  match entity.get_value(name) {
    Lookup::NotFound => Err(not_found(owner, name)),
    Lookup::Empty => Ok(StatusCode::NO_CONTENT.into_response()),
    Lookup::Value(v) => Ok(Json(v).into_response()),
  }
}

pub fn raw_value_response<E: Properties>(
  entity: &E,
  owner: &str,
  name: &str,
) -> Result<Response, ApiError> {
  match entity.get_value(name) {
    Lookup::NotFound => Err(not_found(owner, name)),
    Lookup::Empty => Ok(StatusCode::NO_CONTENT.into_response()),
    Lookup::Value(v) => {
      let raw = v.raw().ok_or_else(|| {
        let shape = if v.is_collection() { "a collection" } else { "structured" };
        ApiError::BadRequest(format!("property {name:?} is {shape} and has no raw value"))
      })?;
      Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], raw).into_response())
    }
  }
}

fn not_found(owner: &str, name: &str) -> ApiError {
  ApiError::NotFound(format!("{owner} has no property {name:?}"))
}
