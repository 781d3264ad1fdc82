//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 strings. Structured fields (address, tags)
//! are stored as compact JSON.

use std::collections::BTreeMap;

use airvinyl_core::{
  person::{Gender, Person, VinylRecord},
  record_store::{Address, Rating, RecordStore, StoreKind},
};
use chrono::NaiveDate;

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str { g.as_str() }

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "Female" => Ok(Gender::Female),
    "Male" => Ok(Gender::Male),
    "Other" => Ok(Gender::Other),
    other => Err(Error::Decode {
      column: "gender",
      value:  other.to_owned(),
    }),
  }
}

// ─── Address / tags ──────────────────────────────────────────────────────────

pub fn encode_address(a: &Address) -> Result<String> {
  Ok(serde_json::to_string(a)?)
}

pub fn decode_address(s: &str) -> Result<Address> { Ok(serde_json::from_str(s)?) }

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PERSON_COLUMNS: &str = "person_id, email, first_name, last_name, \
                                  date_of_birth, gender, number_of_records_on_wish_list";

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub person_id:                      i64,
  pub email:                          Option<String>,
  pub first_name:                     Option<String>,
  pub last_name:                      Option<String>,
  pub date_of_birth:                  Option<String>,
  pub gender:                         Option<String>,
  pub number_of_records_on_wish_list: i32,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:                      row.get(0)?,
      email:                          row.get(1)?,
      first_name:                     row.get(2)?,
      last_name:                      row.get(3)?,
      date_of_birth:                  row.get(4)?,
      gender:                         row.get(5)?,
      number_of_records_on_wish_list: row.get(6)?,
    })
  }

  pub fn into_person(self, vinyl_records: Vec<VinylRecord>) -> Result<Person> {
    Ok(Person {
      person_id: self.person_id,
      email: self.email,
      first_name: self.first_name,
      last_name: self.last_name,
      date_of_birth: self.date_of_birth.as_deref().map(decode_date).transpose()?,
      gender: self.gender.as_deref().map(decode_gender).transpose()?,
      number_of_records_on_wish_list: self.number_of_records_on_wish_list,
      vinyl_records,
    })
  }
}

pub const VINYL_RECORD_COLUMNS: &str =
  "vinyl_record_id, person_id, title, artist, catalog_number, year";

/// A `vinyl_records` row; the owner id is kept for grouping.
pub struct RawVinylRecord {
  pub person_id: i64,
  pub record:    VinylRecord,
}

impl RawVinylRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id: row.get(1)?,
      record:    VinylRecord {
        vinyl_record_id: row.get(0)?,
        title:           row.get(2)?,
        artist:          row.get(3)?,
        catalog_number:  row.get(4)?,
        year:            row.get(5)?,
      },
    })
  }
}

pub const RECORD_STORE_COLUMNS: &str =
  "record_store_id, name, store_address, tags, specialization";

/// Raw values read directly from a `record_stores` row.
pub struct RawRecordStore {
  pub record_store_id: i64,
  pub name:            String,
  pub store_address:   Option<String>,
  pub tags:            String,
  pub specialization:  Option<String>,
}

impl RawRecordStore {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_store_id: row.get(0)?,
      name:            row.get(1)?,
      store_address:   row.get(2)?,
      tags:            row.get(3)?,
      specialization:  row.get(4)?,
    })
  }

  pub fn into_record_store(self, ratings: Vec<Rating>) -> Result<RecordStore> {
    let kind = match self.specialization {
      Some(specialization) => StoreKind::Specialized { specialization },
      None => StoreKind::Base,
    };
    Ok(RecordStore {
      record_store_id: self.record_store_id,
      name: self.name,
      store_address: self.store_address.as_deref().map(decode_address).transpose()?,
      tags: decode_tags(&self.tags)?,
      ratings,
      kind,
    })
  }
}

pub const RATING_COLUMNS: &str = "rating_id, record_store_id, person_id, value";

/// A `ratings` row; the owning store id is kept for grouping.
pub struct RawRating {
  pub record_store_id: i64,
  pub rating:          Rating,
}

impl RawRating {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_store_id: row.get(1)?,
      rating:          Rating {
        rating_id: row.get(0)?,
        rated_by:  row.get(2)?,
        value:     row.get(3)?,
      },
    })
  }
}

/// Group child rows under their parent id, preserving row order.
pub fn group_by<T, C>(
  rows: Vec<T>,
  split: impl Fn(T) -> (i64, C),
) -> BTreeMap<i64, Vec<C>> {
  let mut map: BTreeMap<i64, Vec<C>> = BTreeMap::new();
  for row in rows {
    let (parent, child) = split(row);
    map.entry(parent).or_default().push(child);
  }
  map
}
