//! Read any declared attribute of an entity by its name.
//!
//! Each entity type declares a static table mapping property names to typed
//! reader functions. Lookup is an exact, case-sensitive match on the name and
//! has three distinguishable outcomes, see [`Lookup`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  person::{Gender, Person, VinylRecord},
  record_store::{Address, Rating, RecordStore, StoreKind},
};

// ─── Values ──────────────────────────────────────────────────────────────────

/// The current value of a property, independent of its declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
  Integer(i64),
  Text(String),
  Date(NaiveDate),
  Gender(Gender),
  Address(Address),
  Strings(Vec<String>),
  VinylRecords(Vec<VinylRecord>),
  Ratings(Vec<Rating>),
}

impl PropertyValue {
  pub fn is_collection(&self) -> bool {
    matches!(
      self,
      Self::Strings(_) | Self::VinylRecords(_) | Self::Ratings(_)
    )
  }

  /// The plain-text rendering of a primitive value. Structured and
  /// collection values have none.
  pub fn raw(&self) -> Option<String> {
    match self {
      Self::Integer(v) => Some(v.to_string()),
      Self::Text(v) => Some(v.clone()),
      Self::Date(v) => Some(v.to_string()),
      Self::Gender(v) => Some(v.as_str().to_owned()),
      Self::Address(_)
      | Self::Strings(_)
      | Self::VinylRecords(_)
      | Self::Ratings(_) => None,
    }
  }
}

/// Outcome of [`Properties::get_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
  /// The entity declares no property with that name.
  NotFound,
  /// The property exists but currently has no value.
  Empty,
  Value(PropertyValue),
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// One entry in a property table.
pub struct Property<E> {
  pub name: &'static str,
  read:     fn(&E) -> Option<PropertyValue>,
}

/// Entities whose attributes can be read by name.
pub trait Properties: Sized + 'static {
  /// The tables declared by this instance, searched in order.
  fn property_tables(&self) -> &'static [&'static [Property<Self>]];

  fn property(&self, name: &str) -> Option<&'static Property<Self>> {
    self
      .property_tables()
      .iter()
      .flat_map(|table| table.iter())
      .find(|p| p.name == name)
  }

  fn has_property(&self, name: &str) -> bool { self.property(name).is_some() }

  fn get_value(&self, name: &str) -> Lookup {
    match self.property(name) {
      None => Lookup::NotFound,
      Some(p) => match (p.read)(self) {
        None => Lookup::Empty,
        Some(v) => Lookup::Value(v),
      },
    }
  }
}

const PERSON: &[Property<Person>] = &[
  Property {
    name: "PersonId",
    read: |p| Some(PropertyValue::Integer(p.person_id)),
  },
  Property {
    name: "Email",
    read: |p| p.email.clone().map(PropertyValue::Text),
  },
  Property {
    name: "FirstName",
    read: |p| p.first_name.clone().map(PropertyValue::Text),
  },
  Property {
    name: "LastName",
    read: |p| p.last_name.clone().map(PropertyValue::Text),
  },
  Property {
    name: "DateOfBirth",
    read: |p| p.date_of_birth.map(PropertyValue::Date),
  },
  Property {
    name: "Gender",
    read: |p| p.gender.map(PropertyValue::Gender),
  },
  Property {
    name: "NumberOfRecordsOnWishList",
    read: |p| {
      Some(PropertyValue::Integer(i64::from(
        p.number_of_records_on_wish_list,
      )))
    },
  },
  Property {
    name: "VinylRecords",
    read: |p| Some(PropertyValue::VinylRecords(p.vinyl_records.clone())),
  },
];

const PERSON_TABLES: &[&[Property<Person>]] = &[PERSON];

const RECORD_STORE: &[Property<RecordStore>] = &[
  Property {
    name: "RecordStoreId",
    read: |s| Some(PropertyValue::Integer(s.record_store_id)),
  },
  Property {
    name: "Name",
    read: |s| Some(PropertyValue::Text(s.name.clone())),
  },
  Property {
    name: "StoreAddress",
    read: |s| s.store_address.clone().map(PropertyValue::Address),
  },
  Property {
    name: "Tags",
    read: |s| Some(PropertyValue::Strings(s.tags.clone())),
  },
  Property {
    name: "Ratings",
    read: |s| Some(PropertyValue::Ratings(s.ratings.clone())),
  },
];

const SPECIALIZED_RECORD_STORE: &[Property<RecordStore>] = &[Property {
  name: "Specialization",
  read: |s| match &s.kind {
    StoreKind::Specialized { specialization } => {
      Some(PropertyValue::Text(specialization.clone()))
    }
    StoreKind::Base => None,
  },
}];

const BASE_STORE_TABLES: &[&[Property<RecordStore>]] = &[RECORD_STORE];
const SPECIALIZED_STORE_TABLES: &[&[Property<RecordStore>]] =
  &[RECORD_STORE, SPECIALIZED_RECORD_STORE];

impl Properties for Person {
  fn property_tables(&self) -> &'static [&'static [Property<Self>]] {
    PERSON_TABLES
  }
}

impl Properties for RecordStore {
  fn property_tables(&self) -> &'static [&'static [Property<Self>]] {
    match self.kind {
      StoreKind::Base => BASE_STORE_TABLES,
      StoreKind::Specialized { .. } => SPECIALIZED_STORE_TABLES,
    }
  }
}
