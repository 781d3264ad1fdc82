//! Narrowing record stores to the specialized variant.

use crate::{
  Error, Result,
  record_store::{RecordStore, StoreKind},
  store::EntityStore,
};

/// Outcome of looking up one specialized record store by id.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecializedLookup {
  /// No record store has the id.
  NotFound,
  /// The record store exists but is the base variant.
  NotSpecialized,
  Specialized(RecordStore),
}

impl SpecializedLookup {
  pub fn into_option(self) -> Option<RecordStore> {
    match self {
      Self::Specialized(s) => Some(s),
      Self::NotFound | Self::NotSpecialized => None,
    }
  }
}

/// Keep only the specialized variants, in their original order.
pub fn filter_specialized(
  stores: impl IntoIterator<Item = RecordStore>,
) -> Vec<RecordStore> {
  stores
    .into_iter()
    .filter(RecordStore::is_specialized)
    .collect()
}

pub fn filter_specialized_by_id(
  stores: impl IntoIterator<Item = RecordStore>,
  id: i64,
) -> SpecializedLookup {
  match stores.into_iter().find(|s| s.record_store_id == id) {
    None => SpecializedLookup::NotFound,
    Some(s) => match s.kind {
      StoreKind::Specialized { .. } => SpecializedLookup::Specialized(s),
      StoreKind::Base => SpecializedLookup::NotSpecialized,
    },
  }
}

pub async fn specialized_record_stores<S: EntityStore>(
  store: &S,
) -> Result<Vec<RecordStore>> {
  let stores = store.list_record_stores().await.map_err(Error::store)?;
  Ok(filter_specialized(stores))
}

pub async fn specialized_record_store<S: EntityStore>(
  store: &S,
  id: i64,
) -> Result<SpecializedLookup> {
  let found = store.get_record_store(id).await.map_err(Error::store)?;
  Ok(filter_specialized_by_id(found, id))
}
