//! Record stores and the ratings they own.
//!
//! The base/specialized distinction is a tagged variant ([`StoreKind`]) on an
//! otherwise uniform [`RecordStore`], so every base operation works on both.

use serde::{Deserialize, Serialize};

/// Highest value a rating may carry. The lowest is 1.
pub const MAX_RATING: i32 = 5;

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub postal_code: Option<String>,
  pub country:     Option<String>,
}

/// A single rating, owned by exactly one record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rating {
  pub rating_id: i64,
  pub value:     i32,
  /// Id of the authoring person. Non-owning.
  pub rated_by:  i64,
}

/// Which capability set a record store carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Kind")]
pub enum StoreKind {
  Base,
  #[serde(rename_all = "PascalCase")]
  Specialized { specialization: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordStore {
  pub record_store_id: i64,
  pub name:            String,
  pub store_address:   Option<Address>,
  pub tags:            Vec<String>,
  pub ratings:         Vec<Rating>,
  #[serde(flatten)]
  pub kind:            StoreKind,
}

impl RecordStore {
  pub fn is_specialized(&self) -> bool {
    matches!(self.kind, StoreKind::Specialized { .. })
  }

  /// Mean of all rating values, or `None` when the store is unrated.
  pub fn average_rating(&self) -> Option<f64> {
    if self.ratings.is_empty() {
      return None;
    }
    let sum: i64 = self.ratings.iter().map(|r| i64::from(r.value)).sum();
    Some(sum as f64 / self.ratings.len() as f64)
  }

  /// True iff the store has ratings and their real-valued mean is strictly
  /// greater than `minimum_rating`.
  pub fn is_high_rated(&self, minimum_rating: i32) -> bool {
    self
      .average_rating()
      .is_some_and(|avg| avg > f64::from(minimum_rating))
  }

  /// True iff any rating was authored by one of `person_ids`.
  pub fn is_rated_by_any(&self, person_ids: &[i64]) -> bool {
    self.ratings.iter().any(|r| person_ids.contains(&r.rated_by))
  }

  /// Ids of the ratings authored by `person_id`.
  pub fn rating_ids_by(&self, person_id: i64) -> Vec<i64> {
    self
      .ratings
      .iter()
      .filter(|r| r.rated_by == person_id)
      .map(|r| r.rating_id)
      .collect()
  }
}

/// Input to [`crate::store::EntityStore::add_record_store`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewRecordStore {
  pub name:          String,
  pub store_address: Option<Address>,
  #[serde(default)]
  pub tags:          Vec<String>,
  #[serde(flatten)]
  pub kind:          StoreKind,
}

impl NewRecordStore {
  pub fn base(name: impl Into<String>) -> Self {
    Self {
      name:          name.into(),
      store_address: None,
      tags:          Vec::new(),
      kind:          StoreKind::Base,
    }
  }

  pub fn specialized(
    name: impl Into<String>,
    specialization: impl Into<String>,
  ) -> Self {
    Self {
      kind: StoreKind::Specialized {
        specialization: specialization.into(),
      },
      ..Self::base(name)
    }
  }

  /// Tags sorted and de-duplicated; they form a set.
  pub fn normalized_tags(&self) -> Vec<String> {
    let mut tags = self.tags.clone();
    tags.sort();
    tags.dedup();
    tags
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store_with(values: &[i32]) -> RecordStore {
    RecordStore {
      record_store_id: 1,
      name:            "Vinyl Heaven".into(),
      store_address:   None,
      tags:            Vec::new(),
      ratings:         values
        .iter()
        .enumerate()
        .map(|(i, v)| Rating {
          rating_id: i as i64 + 1,
          value:     *v,
          rated_by:  i as i64 + 1,
        })
        .collect(),
      kind:            StoreKind::Base,
    }
  }

  #[test]
  fn unrated_store_is_never_high_rated() {
    let store = store_with(&[]);
    assert_eq!(store.average_rating(), None);
    for threshold in [-10, 0, 1, 5] {
      assert!(!store.is_high_rated(threshold));
    }
  }

  #[test]
  fn fractional_average_is_not_truncated() {
    let store = store_with(&[3, 4]);
    assert_eq!(store.average_rating(), Some(3.5));
    assert!(store.is_high_rated(3));
    assert!(!store.is_high_rated(4));
  }

  #[test]
  fn threshold_comparison_is_strict() {
    let store = store_with(&[4, 4]);
    assert!(!store.is_high_rated(4));
    assert!(store.is_high_rated(3));
  }

  #[test]
  fn rating_ids_by_only_matches_author() {
    let mut store = store_with(&[5, 2]);
    store.ratings.push(Rating { rating_id: 9, value: 1, rated_by: 1 });
    assert_eq!(store.rating_ids_by(1), vec![1, 9]);
    assert!(store.is_rated_by_any(&[2, 7]));
    assert!(!store.is_rated_by_any(&[]));
  }

  #[test]
  fn specialized_kind_serializes_flat() {
    let mut store = store_with(&[]);
    store.kind = StoreKind::Specialized {
      specialization: "Rock".into(),
    };
    let json = serde_json::to_value(&store).unwrap();
    assert_eq!(json["Kind"], "Specialized");
    assert_eq!(json["Specialization"], "Rock");
  }

  #[test]
  fn new_record_store_tags_form_a_set() {
    let mut input = NewRecordStore::base("Shop");
    input.tags = vec!["b".into(), "a".into(), "b".into()];
    assert_eq!(input.normalized_tags(), vec!["a", "b"]);
  }
}
