//! BTreeMap-backed `EntityStore` for exercising the core logic in tests.

use std::{
  collections::BTreeMap,
  sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

use crate::{
  person::{NewPerson, Person, VinylRecord},
  record_store::{NewRecordStore, Rating, RecordStore},
  store::{Change, EntityStore, UnitOfWork},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("lock poisoned")]
  LockPoisoned,
  #[error("commit rejected")]
  CommitRejected,
  #[error("dangling reference in staged change: {0}")]
  Dangling(String),
}

#[derive(Default)]
struct Tables {
  people:  BTreeMap<i64, Person>,
  stores:  BTreeMap<i64, RecordStore>,
  next_id: i64,
}

impl Tables {
  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }
}

/// Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
  tables:        Arc<RwLock<Tables>>,
  reject_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Make every following commit fail without applying anything.
  pub fn reject_commits(&self) { self.reject_writes.store(true, Ordering::SeqCst); }

  /// Attach a rating directly, bypassing the unit of work. Test fixture only.
  pub fn seed_rating(&self, record_store_id: i64, value: i32, rated_by: i64) {
    let mut t = self.tables.write().unwrap();
    let rating_id = t.next_id();
    t.stores
      .get_mut(&record_store_id)
      .expect("seeded store exists")
      .ratings
      .push(Rating { rating_id, value, rated_by });
  }
}

impl EntityStore for InMemoryStore {
  type Error = MemoryError;

  async fn add_person(&self, input: NewPerson) -> Result<Person, MemoryError> {
    let mut t = self.tables.write().map_err(|_| MemoryError::LockPoisoned)?;
    let person_id = t.next_id();
    let vinyl_records = input
      .vinyl_records
      .into_iter()
      .map(|v| VinylRecord {
        vinyl_record_id: t.next_id(),
        title:           v.title,
        artist:          v.artist,
        catalog_number:  v.catalog_number,
        year:            v.year,
      })
      .collect();
    let person = Person {
      person_id,
      email: input.email,
      first_name: input.first_name,
      last_name: input.last_name,
      date_of_birth: input.date_of_birth,
      gender: input.gender,
      number_of_records_on_wish_list: input.number_of_records_on_wish_list,
      vinyl_records,
    };
    t.people.insert(person_id, person.clone());
    Ok(person)
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>, MemoryError> {
    let t = self.tables.read().map_err(|_| MemoryError::LockPoisoned)?;
    Ok(t.people.get(&id).cloned())
  }

  async fn list_people(&self) -> Result<Vec<Person>, MemoryError> {
    let t = self.tables.read().map_err(|_| MemoryError::LockPoisoned)?;
    Ok(t.people.values().cloned().collect())
  }

  async fn update_person(&self, person: Person) -> Result<bool, MemoryError> {
    let mut t = self.tables.write().map_err(|_| MemoryError::LockPoisoned)?;
    Ok(match t.people.get_mut(&person.person_id) {
      Some(current) => {
        let vinyl_records = std::mem::take(&mut current.vinyl_records);
        *current = Person { vinyl_records, ..person };
        true
      }
      None => false,
    })
  }

  async fn delete_person(&self, id: i64) -> Result<bool, MemoryError> {
    let mut t = self.tables.write().map_err(|_| MemoryError::LockPoisoned)?;
    if t.people.remove(&id).is_none() {
      return Ok(false);
    }
    for store in t.stores.values_mut() {
      store.ratings.retain(|r| r.rated_by != id);
    }
    Ok(true)
  }

  async fn add_record_store(
    &self,
    input: NewRecordStore,
  ) -> Result<RecordStore, MemoryError> {
    let mut t = self.tables.write().map_err(|_| MemoryError::LockPoisoned)?;
    let store = RecordStore {
      record_store_id: t.next_id(),
      tags:            input.normalized_tags(),
      name:            input.name,
      store_address:   input.store_address,
      ratings:         Vec::new(),
      kind:            input.kind,
    };
    t.stores.insert(store.record_store_id, store.clone());
    Ok(store)
  }

  async fn get_record_store(&self, id: i64) -> Result<Option<RecordStore>, MemoryError> {
    let t = self.tables.read().map_err(|_| MemoryError::LockPoisoned)?;
    Ok(t.stores.get(&id).cloned())
  }

  async fn list_record_stores(&self) -> Result<Vec<RecordStore>, MemoryError> {
    let t = self.tables.read().map_err(|_| MemoryError::LockPoisoned)?;
    Ok(t.stores.values().cloned().collect())
  }

  async fn commit(&self, work: UnitOfWork) -> Result<usize, MemoryError> {
    if self.reject_writes.load(Ordering::SeqCst) {
      return Err(MemoryError::CommitRejected);
    }
    let mut t = self.tables.write().map_err(|_| MemoryError::LockPoisoned)?;

    // Validate everything before touching any row.
    for change in work.changes() {
      if let Change::InsertRating { record_store_id, rated_by, .. } = change {
        if !t.stores.contains_key(record_store_id) {
          return Err(MemoryError::Dangling(format!("record store {record_store_id}")));
        }
        if !t.people.contains_key(rated_by) {
          return Err(MemoryError::Dangling(format!("person {rated_by}")));
        }
      }
    }

    let mut changed = 0;
    for change in work.into_changes() {
      match change {
        Change::InsertRating { record_store_id, value, rated_by } => {
          let rating_id = t.next_id();
          if let Some(store) = t.stores.get_mut(&record_store_id) {
            store.ratings.push(Rating { rating_id, value, rated_by });
            changed += 1;
          }
        }
        Change::DeleteRating { rating_id } => {
          for store in t.stores.values_mut() {
            let before = store.ratings.len();
            store.ratings.retain(|r| r.rating_id != rating_id);
            changed += before - store.ratings.len();
          }
        }
      }
    }
    Ok(changed)
  }
}
