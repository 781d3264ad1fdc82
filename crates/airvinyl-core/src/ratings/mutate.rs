//! Write-side rating operations.
//!
//! Each operation validates its inputs against the store, stages its row
//! changes on a fresh [`UnitOfWork`], and issues exactly one commit. The
//! returned `bool` is whether that commit changed any row; `false` is a
//! successful no-op, not an error.

use tracing::{info, warn};

use crate::{
  Error, Result,
  parameters::ActionParameters,
  record_store::MAX_RATING,
  store::{EntityStore, UnitOfWork},
};

/// Add a rating to a record store from named action parameters
/// (`rating`, `personId`).
///
/// The store is resolved before the parameters are read, so a missing store
/// is reported as [`Error::NotFound`] even when the parameters are malformed.
pub async fn rate<S: EntityStore>(
  store: &S,
  record_store_id: i64,
  params: &ActionParameters,
) -> Result<bool> {
  ensure_record_store(store, record_store_id).await?;
  let value = params.int32("rating")?;
  let person_id = params.int("personId")?;
  add_rating(store, record_store_id, person_id, value).await
}

/// Add a rating of `value` by `person_id` to a record store.
pub async fn rate_with<S: EntityStore>(
  store: &S,
  record_store_id: i64,
  person_id: i64,
  value: i32,
) -> Result<bool> {
  ensure_record_store(store, record_store_id).await?;
  add_rating(store, record_store_id, person_id, value).await
}

/// Remove every rating authored by `person_id`, across all record stores, in
/// one commit. Ratings by other people are untouched.
pub async fn remove_ratings_by_person<S: EntityStore>(
  store: &S,
  person_id: i64,
) -> Result<bool> {
  let stores = store.list_record_stores().await.map_err(Error::store)?;

  let mut work = UnitOfWork::new();
  for record_store in stores.iter().filter(|s| s.is_rated_by_any(&[person_id])) {
    for rating_id in record_store.rating_ids_by(person_id) {
      work.remove_rating(rating_id);
    }
  }

  commit(store, work, "remove ratings by person").await
}

/// Boolean contract over [`remove_ratings_by_person`], reading `personId`
/// from the action parameters.
pub async fn remove_ratings<S: EntityStore>(
  store: &S,
  params: &ActionParameters,
) -> Result<bool> {
  let person_id = params.int("personId")?;
  remove_ratings_by_person(store, person_id).await
}

/// Empty-success contract over [`remove_ratings_by_person`]: a commit that
/// changes nothing is reported as [`Error::NotApplied`].
pub async fn remove_record_store_ratings<S: EntityStore>(
  store: &S,
  params: &ActionParameters,
) -> Result<()> {
  if remove_ratings(store, params).await? {
    Ok(())
  } else {
    Err(Error::NotApplied)
  }
}

async fn ensure_record_store<S: EntityStore>(
  store: &S,
  record_store_id: i64,
) -> Result<()> {
  store
    .get_record_store(record_store_id)
    .await
    .map_err(Error::store)?
    .map(|_| ())
    .ok_or_else(|| Error::record_store_not_found(record_store_id))
}

async fn add_rating<S: EntityStore>(
  store: &S,
  record_store_id: i64,
  person_id: i64,
  value: i32,
) -> Result<bool> {
  if !(1..=MAX_RATING).contains(&value) {
    return Err(Error::InvalidInput(format!(
      "rating must be between 1 and {MAX_RATING}, got {value}"
    )));
  }

  // The author must exist.
  store
    .get_person(person_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::InvalidInput(format!("person {person_id} does not exist")))?;

  let mut work = UnitOfWork::new();
  work.add_rating(record_store_id, value, person_id);
  commit(store, work, "rate").await
}

async fn commit<S: EntityStore>(
  store: &S,
  work: UnitOfWork,
  operation: &'static str,
) -> Result<bool> {
  let staged = work.len();
  let changed = store.commit(work).await.map_err(Error::store)?;
  if changed > 0 {
    info!(operation, staged, changed, "committed rating changes");
  } else {
    warn!(operation, staged, "commit changed no rows");
  }
  Ok(changed > 0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    memory::InMemoryStore,
    person::NewPerson,
    record_store::{NewRecordStore, RecordStore},
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

  async fn reload(s: &InMemoryStore, id: i64) -> RecordStore {
    s.get_record_store(id).await.unwrap().unwrap()
  }

  fn params(rating: i64, person_id: i64) -> ActionParameters {
    ActionParameters::new()
      .with("rating", rating)
      .with("personId", person_id)
  }

  // ── Rate ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn rate_appends_one_rating() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;

    assert!(rate(&s, a, &params(5, p)).await.unwrap());

    let ratings = reload(&s, a).await.ratings;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].value, 5);
    assert_eq!(ratings[0].rated_by, p);
  }

  #[tokio::test]
  async fn repeated_ratings_accumulate() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;

    rate_with(&s, a, p, 2).await.unwrap();
    rate_with(&s, a, p, 4).await.unwrap();

    let values: Vec<i32> = reload(&s, a).await.ratings.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![2, 4]);
  }

  #[tokio::test]
  async fn rate_missing_store_is_not_found_before_params_are_read() {
    let s = InMemoryStore::new();
    let err = rate(&s, 99, &ActionParameters::new()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { id: 99, .. }));
  }

  #[tokio::test]
  async fn rate_unknown_person_is_invalid_and_changes_nothing() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    rate_with(&s, a, p, 3).await.unwrap();

    let err = rate(&s, a, &params(5, 12345)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(reload(&s, a).await.ratings.len(), 1);
  }

  #[tokio::test]
  async fn rate_rejects_malformed_parameters() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;

    let missing = ActionParameters::new().with("personId", p);
    let not_int = ActionParameters::new()
      .with("rating", "five")
      .with("personId", p);

    for bad in [missing, not_int] {
      let err = rate(&s, a, &bad).await.unwrap_err();
      assert!(matches!(err, Error::InvalidInput(_)));
    }
    assert!(reload(&s, a).await.ratings.is_empty());
  }

  #[tokio::test]
  async fn rate_enforces_value_bounds() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;

    for value in [0, MAX_RATING + 1, -3] {
      let err = rate_with(&s, a, p, value).await.unwrap_err();
      assert!(matches!(err, Error::InvalidInput(_)), "value {value}");
    }
    assert!(rate_with(&s, a, p, 1).await.unwrap());
    assert!(rate_with(&s, a, p, MAX_RATING).await.unwrap());
  }

  #[tokio::test]
  async fn rate_propagates_store_failure() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    s.reject_commits();

    let err = rate_with(&s, a, p, 4).await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(reload(&s, a).await.ratings.is_empty());
  }

  // ── Remove ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn remove_ratings_by_person_only_touches_that_person() {
    let s = InMemoryStore::new();
    let target = person(&s).await;
    let other = person(&s).await;
    let a = record_store(&s, "A").await;
    let b = record_store(&s, "B").await;
    let c = record_store(&s, "C").await;
    s.seed_rating(a, 5, target);
    s.seed_rating(a, 3, other);
    s.seed_rating(b, 4, other);
    s.seed_rating(c, 1, target);
    s.seed_rating(c, 2, target);

    assert!(remove_ratings_by_person(&s, target).await.unwrap());

    let a = reload(&s, a).await;
    assert_eq!(a.ratings.len(), 1);
    assert_eq!(a.ratings[0].rated_by, other);
    assert_eq!(reload(&s, b).await.ratings.len(), 1);
    assert!(reload(&s, c).await.ratings.is_empty());

    // Nothing left to remove.
    assert!(!remove_ratings_by_person(&s, target).await.unwrap());
  }

  #[tokio::test]
  async fn failed_bulk_removal_leaves_every_store_intact() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    let c = record_store(&s, "C").await;
    s.seed_rating(a, 5, p);
    s.seed_rating(c, 5, p);
    s.reject_commits();

    assert!(matches!(
      remove_ratings_by_person(&s, p).await,
      Err(Error::Store(_))
    ));
    assert_eq!(reload(&s, a).await.ratings.len(), 1);
    assert_eq!(reload(&s, c).await.ratings.len(), 1);
  }

  #[tokio::test]
  async fn removal_contracts_share_semantics() {
    let s = InMemoryStore::new();
    let p = person(&s).await;
    let a = record_store(&s, "A").await;
    s.seed_rating(a, 5, p);
    let by_p = ActionParameters::new().with("personId", p.to_string());

    remove_record_store_ratings(&s, &by_p).await.unwrap();
    assert!(reload(&s, a).await.ratings.is_empty());

    assert!(matches!(
      remove_record_store_ratings(&s, &by_p).await,
      Err(Error::NotApplied)
    ));
    assert!(!remove_ratings(&s, &by_p).await.unwrap());
  }

  #[tokio::test]
  async fn remove_rejects_malformed_person_id() {
    let s = InMemoryStore::new();
    let bad = ActionParameters::new().with("personId", "x1");
    assert!(matches!(
      remove_ratings(&s, &bad).await,
      Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
      remove_record_store_ratings(&s, &bad).await,
      Err(Error::InvalidInput(_))
    ));
  }
}
