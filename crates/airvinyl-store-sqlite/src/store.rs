//! [`SqliteStore`] — the SQLite implementation of [`EntityStore`].

use std::path::Path;

use tracing::debug;

use airvinyl_core::{
  person::{NewPerson, Person, VinylRecord},
  record_store::{NewRecordStore, RecordStore, StoreKind},
  store::{Change, EntityStore, UnitOfWork},
};

use crate::{
  Result,
  encode::{
    PERSON_COLUMNS, RATING_COLUMNS, RECORD_STORE_COLUMNS, RawPerson, RawRating,
    RawRecordStore, RawVinylRecord, VINYL_RECORD_COLUMNS, encode_address,
    encode_date, encode_gender, encode_tags, group_by,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An AirVinyl entity store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Whether the store holds no people and no record stores.
  pub async fn is_empty(&self) -> Result<bool> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT (SELECT COUNT(*) FROM people) + (SELECT COUNT(*) FROM record_stores)",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(count == 0)
  }

  /// Load people matching `filter` together with their vinyl records. The
  /// filter is a `WHERE` clause (or empty) over a column both tables share.
  async fn load_people(
    &self,
    filter: &'static str,
    params: Vec<i64>,
  ) -> Result<Vec<Person>> {
    let (raws, records): (Vec<RawPerson>, Vec<RawVinylRecord>) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people {filter} ORDER BY person_id"
        ))?;
        let people = stmt
          .query_map(rusqlite::params_from_iter(&params), RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {VINYL_RECORD_COLUMNS} FROM vinyl_records {filter}
           ORDER BY vinyl_record_id"
        ))?;
        let records = stmt
          .query_map(rusqlite::params_from_iter(&params), RawVinylRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((people, records))
      })
      .await?;

    let mut records = group_by(records, |r| (r.person_id, r.record));
    raws
      .into_iter()
      .map(|raw| {
        let owned = records.remove(&raw.person_id).unwrap_or_default();
        raw.into_person(owned)
      })
      .collect()
  }

  /// Load record stores matching `filter` together with their ratings. The
  /// filter is a `WHERE` clause (or empty) over a column both tables share.
  async fn load_record_stores(
    &self,
    filter: &'static str,
    params: Vec<i64>,
  ) -> Result<Vec<RecordStore>> {
    let (raws, ratings): (Vec<RawRecordStore>, Vec<RawRating>) = self
      .conn
      .call(move |conn| {
        // Both reads see one snapshot.
        let tx = conn.transaction()?;
        let stores = {
          let mut stmt = tx.prepare(&format!(
            "SELECT {RECORD_STORE_COLUMNS} FROM record_stores {filter}
             ORDER BY record_store_id"
          ))?;
          stmt
            .query_map(rusqlite::params_from_iter(&params), RawRecordStore::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let ratings = {
          let mut stmt = tx.prepare(&format!(
            "SELECT {RATING_COLUMNS} FROM ratings {filter} ORDER BY rating_id"
          ))?;
          stmt
            .query_map(rusqlite::params_from_iter(&params), RawRating::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        Ok((stores, ratings))
      })
      .await?;

    let mut ratings = group_by(ratings, |r| (r.record_store_id, r.rating));
    raws
      .into_iter()
      .map(|raw| {
        let owned = ratings.remove(&raw.record_store_id).unwrap_or_default();
        raw.into_record_store(owned)
      })
      .collect()
  }
}

// ─── EntityStore impl ────────────────────────────────────────────────────────

impl EntityStore for SqliteStore {
  type Error = crate::Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let date_of_birth = input.date_of_birth.map(encode_date);
    let gender = input.gender.map(encode_gender);

    let (person_id, record_ids): (i64, Vec<i64>) = {
      let input = input.clone();
      self
        .conn
        .call(move |conn| {
          let tx = conn.transaction()?;
          tx.execute(
            "INSERT INTO people (
               email, first_name, last_name, date_of_birth, gender,
               number_of_records_on_wish_list
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
              input.email,
              input.first_name,
              input.last_name,
              date_of_birth,
              gender,
              input.number_of_records_on_wish_list,
            ],
          )?;
          let person_id = tx.last_insert_rowid();

          let mut record_ids = Vec::with_capacity(input.vinyl_records.len());
          for v in &input.vinyl_records {
            tx.execute(
              "INSERT INTO vinyl_records (person_id, title, artist, catalog_number, year)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![person_id, v.title, v.artist, v.catalog_number, v.year],
            )?;
            record_ids.push(tx.last_insert_rowid());
          }

          tx.commit()?;
          Ok((person_id, record_ids))
        })
        .await?
    };

    let vinyl_records = input
      .vinyl_records
      .into_iter()
      .zip(record_ids)
      .map(|(v, vinyl_record_id)| VinylRecord {
        vinyl_record_id,
        title: v.title,
        artist: v.artist,
        catalog_number: v.catalog_number,
        year: v.year,
      })
      .collect();

    Ok(Person {
      person_id,
      email: input.email,
      first_name: input.first_name,
      last_name: input.last_name,
      date_of_birth: input.date_of_birth,
      gender: input.gender,
      number_of_records_on_wish_list: input.number_of_records_on_wish_list,
      vinyl_records,
    })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    Ok(
      self
        .load_people("WHERE person_id = ?1", vec![id])
        .await?
        .into_iter()
        .next(),
    )
  }

  async fn list_people(&self) -> Result<Vec<Person>> {
    self.load_people("", Vec::new()).await
  }

  async fn update_person(&self, person: Person) -> Result<bool> {
    let date_of_birth = person.date_of_birth.map(encode_date);
    let gender = person.gender.map(encode_gender);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE people SET
             email = ?2, first_name = ?3, last_name = ?4, date_of_birth = ?5,
             gender = ?6, number_of_records_on_wish_list = ?7
           WHERE person_id = ?1",
          rusqlite::params![
            person.person_id,
            person.email,
            person.first_name,
            person.last_name,
            date_of_birth,
            gender,
            person.number_of_records_on_wish_list,
          ],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    // Vinyl records and authored ratings go with the row (ON DELETE CASCADE).
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM people WHERE person_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Record stores ─────────────────────────────────────────────────────────

  async fn add_record_store(&self, input: NewRecordStore) -> Result<RecordStore> {
    let tags = input.normalized_tags();
    let tags_str = encode_tags(&tags)?;
    let address_str = input.store_address.as_ref().map(encode_address).transpose()?;
    let specialization = match &input.kind {
      StoreKind::Specialized { specialization } => Some(specialization.clone()),
      StoreKind::Base => None,
    };
    let name = input.name.clone();

    let record_store_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO record_stores (name, store_address, tags, specialization)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, address_str, tags_str, specialization],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(RecordStore {
      record_store_id,
      name: input.name,
      store_address: input.store_address,
      tags,
      ratings: Vec::new(),
      kind: input.kind,
    })
  }

  async fn get_record_store(&self, id: i64) -> Result<Option<RecordStore>> {
    Ok(
      self
        .load_record_stores("WHERE record_store_id = ?1", vec![id])
        .await?
        .into_iter()
        .next(),
    )
  }

  async fn list_record_stores(&self) -> Result<Vec<RecordStore>> {
    self.load_record_stores("", Vec::new()).await
  }

  // ── Commit ────────────────────────────────────────────────────────────────

  async fn commit(&self, work: UnitOfWork) -> Result<usize> {
    let changes = work.into_changes();
    let staged = changes.len();

    let changed = self
      .conn
      .call(move |conn| {
        // Dropping the transaction on any error rolls every change back.
        let tx = conn.transaction()?;
        let mut changed = 0;
        for change in changes {
          changed += match change {
            Change::InsertRating {
              record_store_id,
              value,
              rated_by,
            } => tx.execute(
              "INSERT INTO ratings (record_store_id, person_id, value)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![record_store_id, rated_by, value],
            )?,
            Change::DeleteRating { rating_id } => tx.execute(
              "DELETE FROM ratings WHERE rating_id = ?1",
              rusqlite::params![rating_id],
            )?,
          };
        }
        tx.commit()?;
        Ok(changed)
      })
      .await?;

    debug!(staged, changed, "committed unit of work");
    Ok(changed)
  }
}
