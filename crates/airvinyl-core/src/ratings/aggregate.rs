//! Read-only computations over the ratings of record stores.

use tracing::debug;

use crate::{Error, Result, record_store::RecordStore, store::EntityStore};

/// Stores whose real-valued average rating exceeds `minimum_rating`, sorted
/// by id. Unrated stores never qualify.
pub fn high_rated(
  stores: impl IntoIterator<Item = RecordStore>,
  minimum_rating: i32,
) -> Vec<RecordStore> {
  let mut out: Vec<RecordStore> = stores
    .into_iter()
    .filter(|s| s.is_high_rated(minimum_rating))
    .collect();
  out.sort_by_key(|s| s.record_store_id);
  out
}

/// Stores with at least one rating authored by any of `person_ids`, sorted by
/// id. An empty id list matches nothing.
pub fn rated_by(
  stores: impl IntoIterator<Item = RecordStore>,
  person_ids: &[i64],
) -> Vec<RecordStore> {
  if person_ids.is_empty() {
    return Vec::new();
  }
  let mut out: Vec<RecordStore> = stores
    .into_iter()
    .filter(|s| s.is_rated_by_any(person_ids))
    .collect();
  out.sort_by_key(|s| s.record_store_id);
  out
}

/// Whether the record store is high rated. A missing store is
/// [`Error::NotFound`].
pub async fn is_high_rated<S: EntityStore>(
  store: &S,
  record_store_id: i64,
  minimum_rating: i32,
) -> Result<bool> {
  let record_store = store
    .get_record_store(record_store_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::record_store_not_found(record_store_id))?;

  let high = record_store.is_high_rated(minimum_rating);
  debug!(
    record_store_id,
    minimum_rating,
    average = ?record_store.average_rating(),
    high,
    "evaluated rating threshold"
  );
  Ok(high)
}

pub async fn are_rated_by<S: EntityStore>(
  store: &S,
  person_ids: &[i64],
) -> Result<Vec<RecordStore>> {
  if person_ids.is_empty() {
    return Ok(Vec::new());
  }
  let stores = store.list_record_stores().await.map_err(Error::store)?;
  Ok(rated_by(stores, person_ids))
}

pub async fn get_high_rated_record_stores<S: EntityStore>(
  store: &S,
  minimum_rating: i32,
) -> Result<Vec<RecordStore>> {
  let stores = store.list_record_stores().await.map_err(Error::store)?;
  Ok(high_rated(stores, minimum_rating))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    memory::InMemoryStore,
    person::NewPerson,
    record_store::NewRecordStore,
  };

  async fn person(s: &InMemoryStore) -> i64 {
    s.add_person(NewPerson::default()).await.unwrap().person_id
  }

  async fn record_store(s: &InMemoryStore, name: &str) -> i64 {
    s.add_record_store(NewRecordStore::base(name))
      .await
      .unwrap()
      .record_store_id
  }

  #[tokio::test]
  async fn is_high_rated_uses_real_average() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    s.seed_rating(a, 3, p);
    s.seed_rating(a, 4, p);

    assert!(is_high_rated(&s, a, 3).await.unwrap());
    assert!(!is_high_rated(&s, a, 4).await.unwrap());
  }

  #[tokio::test]
  async fn is_high_rated_unrated_store_is_false() {
    let s = InMemoryStore::new();
    let a = record_store(&s, "A").await;
    assert!(!is_high_rated(&s, a, 0).await.unwrap());
    assert!(!is_high_rated(&s, a, -1).await.unwrap());
  }

  #[tokio::test]
  async fn is_high_rated_missing_store_is_not_found() {
    let s = InMemoryStore::new();
    let err = is_high_rated(&s, 404, 1).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { id: 404, .. }));
  }

  #[tokio::test]
  async fn are_rated_by_matches_any_listed_person() {
    let s = InMemoryStore::new();
    let p1 = person(&s).await;
    let p2 = person(&s).await;
    let p3 = person(&s).await;
    let a = record_store(&s, "A").await;
    let b = record_store(&s, "B").await;
    let c = record_store(&s, "C").await;
    s.seed_rating(a, 5, p1);
    s.seed_rating(b, 2, p2);
    s.seed_rating(c, 4, p3);

    let ids: Vec<i64> = are_rated_by(&s, &[p1, p2])
      .await
      .unwrap()
      .iter()
      .map(|r| r.record_store_id)
      .collect();
    assert_eq!(ids, vec![a, b]);
  }

  #[tokio::test]
  async fn are_rated_by_empty_ids_is_empty() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    s.seed_rating(a, 5, p);

    assert!(are_rated_by(&s, &[]).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn high_rated_stores_are_sorted_and_skip_unrated() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    let b = record_store(&s, "B").await;
    let _unrated = record_store(&s, "C").await;
    let d = record_store(&s, "D").await;
    s.seed_rating(d, 5, p);
    s.seed_rating(a, 4, p);
    s.seed_rating(a, 5, p);
    s.seed_rating(b, 1, p);

    let ids: Vec<i64> = get_high_rated_record_stores(&s, 3)
      .await
      .unwrap()
      .iter()
      .map(|r| r.record_store_id)
      .collect();
    assert_eq!(ids, vec![a, d]);
  }

  #[tokio::test]
  async fn reads_do_not_change_ratings() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    s.seed_rating(a, 2, p);
    let before = s.list_record_stores().await.unwrap();

    is_high_rated(&s, a, 1).await.unwrap();
    are_rated_by(&s, &[p]).await.unwrap();
    get_high_rated_record_stores(&s, 1).await.unwrap();

    assert_eq!(s.list_record_stores().await.unwrap(), before);
  }
}
