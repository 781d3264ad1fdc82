//! Named parameters supplied to a rating action.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// The decoded body of an action request: a JSON object of named values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ActionParameters(Map<String, Value>);

impl ActionParameters {
  pub fn new() -> Self { Self::default() }

  pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
    self.0.insert(name.to_owned(), value.into());
    self
  }

  /// Read `name` as an integer. JSON integers and strings holding an integer
  /// are accepted; anything else, or a missing value, is invalid input.
  pub fn int(&self, name: &str) -> Result<i64> {
    let value = self
      .0
      .get(name)
      .ok_or_else(|| Error::InvalidInput(format!("missing parameter {name:?}")))?;

    let parsed = match value {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    };

    parsed.ok_or_else(|| {
      Error::InvalidInput(format!("parameter {name:?} is not an integer: {value}"))
    })
  }

  /// Like [`Self::int`], additionally rejecting values outside `i32`.
  pub fn int32(&self, name: &str) -> Result<i32> {
    let v = self.int(name)?;
    i32::try_from(v).map_err(|_| {
      Error::InvalidInput(format!("parameter {name:?} is out of range: {v}"))
    })
  }
}
