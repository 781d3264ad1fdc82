//! People and the vinyl records they own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-reported gender of a [`Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Female,
  Male,
  Other,
}

impl Gender {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Female => "Female",
      Self::Male => "Male",
      Self::Other => "Other",
    }
  }
}

/// A vinyl record owned by a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VinylRecord {
  pub vinyl_record_id: i64,
  pub title:           String,
  pub artist:          String,
  pub catalog_number:  Option<String>,
  pub year:            Option<i32>,
}

/// A person in the catalog. Every scalar except the id is optional.
///
/// Ratings authored by a person are owned by the rated record store; the
/// person only appears on them as `RatedBy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
  pub person_id:                      i64,
  pub email:                          Option<String>,
  pub first_name:                     Option<String>,
  pub last_name:                      Option<String>,
  pub date_of_birth:                  Option<NaiveDate>,
  pub gender:                         Option<Gender>,
  #[serde(default)]
  pub number_of_records_on_wish_list: i32,
  #[serde(default)]
  pub vinyl_records:                  Vec<VinylRecord>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input for a vinyl record created together with its owner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewVinylRecord {
  pub title:          String,
  pub artist:         String,
  pub catalog_number: Option<String>,
  pub year:           Option<i32>,
}

/// Input to [`crate::store::EntityStore::add_person`]. The id is assigned by
/// the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPerson {
  pub email:                          Option<String>,
  pub first_name:                     Option<String>,
  pub last_name:                      Option<String>,
  pub date_of_birth:                  Option<NaiveDate>,
  pub gender:                         Option<Gender>,
  #[serde(default)]
  pub number_of_records_on_wish_list: i32,
  #[serde(default)]
  pub vinyl_records:                  Vec<NewVinylRecord>,
}

/// A partial update. `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonPatch {
  #[serde(default, deserialize_with = "double_option")]
  pub email:                          Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub first_name:                     Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub last_name:                      Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub date_of_birth:                  Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "double_option")]
  pub gender:                         Option<Option<Gender>>,
  pub number_of_records_on_wish_list: Option<i32>,
}

impl PersonPatch {
  /// Apply the set fields to `person`. The id and vinyl records never change.
  pub fn apply(self, person: &mut Person) {
    if let Some(v) = self.email {
      person.email = v;
    }
    if let Some(v) = self.first_name {
      person.first_name = v;
    }
    if let Some(v) = self.last_name {
      person.last_name = v;
    }
    if let Some(v) = self.date_of_birth {
      person.date_of_birth = v;
    }
    if let Some(v) = self.gender {
      person.gender = v;
    }
    if let Some(v) = self.number_of_records_on_wish_list {
      person.number_of_records_on_wish_list = v;
    }
  }
}

impl Person {
  /// Replace every scalar with the values in `input`, keeping the id.
  pub fn replace_scalars(&mut self, input: NewPerson) {
    self.email = input.email;
    self.first_name = input.first_name;
    self.last_name = input.last_name;
    self.date_of_birth = input.date_of_birth;
    self.gender = input.gender;
    self.number_of_records_on_wish_list = input.number_of_records_on_wish_list;
  }
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: serde::Deserializer<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alice() -> Person {
    Person {
      person_id:                      1,
      email:                          Some("alice@example.com".into()),
      first_name:                     Some("Alice".into()),
      last_name:                      None,
      date_of_birth:                  None,
      gender:                         Some(Gender::Female),
      number_of_records_on_wish_list: 3,
      vinyl_records:                  Vec::new(),
    }
  }

  #[test]
  fn patch_distinguishes_absent_from_null() {
    let mut p = alice();
    let patch: PersonPatch =
      serde_json::from_str(r#"{"Email": null, "LastName": "Liddell"}"#).unwrap();
    patch.apply(&mut p);

    assert_eq!(p.email, None);
    assert_eq!(p.last_name.as_deref(), Some("Liddell"));
    // Untouched fields keep their values.
    assert_eq!(p.first_name.as_deref(), Some("Alice"));
    assert_eq!(p.number_of_records_on_wish_list, 3);
  }

  #[test]
  fn replace_scalars_keeps_id() {
    let mut p = alice();
    p.replace_scalars(NewPerson {
      first_name: Some("Alicia".into()),
      ..Default::default()
    });
    assert_eq!(p.person_id, 1);
    assert_eq!(p.first_name.as_deref(), Some("Alicia"));
    assert_eq!(p.email, None);
    assert_eq!(p.gender, None);
  }
}
