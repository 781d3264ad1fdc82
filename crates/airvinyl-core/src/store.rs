//! The `EntityStore` trait and the [`UnitOfWork`] staging object.
//!
//! The trait is implemented by storage backends (e.g.
//! `airvinyl-store-sqlite`). Plain CRUD on people and record stores is issued
//! directly; every rating change is staged on a [`UnitOfWork`] and made
//! durable with a single [`EntityStore::commit`].

use std::future::Future;

use crate::{
  person::{NewPerson, Person},
  record_store::{NewRecordStore, RecordStore},
};

// ─── Unit of work ────────────────────────────────────────────────────────────

/// A single staged row change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  InsertRating {
    record_store_id: i64,
    value:           i32,
    rated_by:        i64,
  },
  DeleteRating {
    rating_id: i64,
  },
}

/// In-memory changes waiting for one atomic commit.
///
/// Nothing is applied until the unit is handed to [`EntityStore::commit`];
/// dropping it discards every staged change.
#[derive(Debug, Default)]
pub struct UnitOfWork {
  changes: Vec<Change>,
}

impl UnitOfWork {
  pub fn new() -> Self { Self::default() }

  pub fn stage(&mut self, change: Change) { self.changes.push(change); }

  pub fn add_rating(&mut self, record_store_id: i64, value: i32, rated_by: i64) {
    self.stage(Change::InsertRating {
      record_store_id,
      value,
      rated_by,
    });
  }

  pub fn remove_rating(&mut self, rating_id: i64) {
    self.stage(Change::DeleteRating { rating_id });
  }

  pub fn is_empty(&self) -> bool { self.changes.is_empty() }

  pub fn len(&self) -> usize { self.changes.len() }

  pub fn changes(&self) -> &[Change] { &self.changes }

  pub fn into_changes(self) -> Vec<Change> { self.changes }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an AirVinyl entity store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EntityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Persist a new person, with any nested vinyl records, and return it with
  /// its assigned ids.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person, vinyl records included. `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All people ordered by id.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Overwrite the scalar fields of an existing person. Returns `false` if no
  /// person has `person.person_id`.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a person together with their vinyl records and authored ratings.
  /// Returns `false` if not found.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Record stores ─────────────────────────────────────────────────────

  /// Persist a new, unrated record store.
  fn add_record_store(
    &self,
    input: NewRecordStore,
  ) -> impl Future<Output = Result<RecordStore, Self::Error>> + Send + '_;

  /// Retrieve a record store with its ratings. `None` if not found.
  fn get_record_store(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<RecordStore>, Self::Error>> + Send + '_;

  /// All record stores, ratings included, ordered by id.
  fn list_record_stores(
    &self,
  ) -> impl Future<Output = Result<Vec<RecordStore>, Self::Error>> + Send + '_;

  // ── Commit ────────────────────────────────────────────────────────────

  /// Apply every staged change atomically and return the number of rows
  /// changed. On error no change is visible.
  fn commit(
    &self,
    work: UnitOfWork,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unit_of_work_keeps_staging_order() {
    let mut work = UnitOfWork::new();
    assert!(work.is_empty());

    work.remove_rating(4);
    work.add_rating(1, 5, 2);

    assert_eq!(work.len(), 2);
    assert_eq!(work.changes()[0], Change::DeleteRating { rating_id: 4 });
    assert_eq!(
      work.into_changes()[1],
      Change::InsertRating {
        record_store_id: 1,
        value:           5,
        rated_by:        2,
      }
    );
  }
}
