//! The demo catalog loaded by `seed_demo_data`.

use airvinyl_core::{
  person::{Gender, NewPerson, NewVinylRecord},
  ratings,
  record_store::{Address, NewRecordStore},
  store::EntityStore,
};
use chrono::NaiveDate;

fn record(title: &str, artist: &str, catalog_number: &str, year: i32) -> NewVinylRecord {
  NewVinylRecord {
    title:          title.to_string(),
    artist:         artist.to_string(),
    catalog_number: Some(catalog_number.to_string()),
    year:           Some(year),
  }
}

fn person(
  first: &str,
  last: &str,
  email: &str,
  dob: (i32, u32, u32),
  gender: Gender,
  wish_list: i32,
  records: Vec<NewVinylRecord>,
) -> NewPerson {
  NewPerson {
    email: Some(email.to_string()),
    first_name: Some(first.to_string()),
    last_name: Some(last.to_string()),
    date_of_birth: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2),
    gender: Some(gender),
    number_of_records_on_wish_list: wish_list,
    vinyl_records: records,
  }
}

fn address(street: &str, city: &str, postal_code: &str) -> Option<Address> {
  Some(Address {
    street:      Some(street.to_string()),
    city:        Some(city.to_string()),
    postal_code: Some(postal_code.to_string()),
    country:     Some("Belgium".to_string()),
  })
}

/// Insert the demo people, record stores, and ratings.
pub async fn seed<S: EntityStore>(store: &S) -> anyhow::Result<()> {
  let people = [
    person(
      "Kevin",
      "Dockx",
      "kevin@example.com",
      (1981, 5, 5),
      Gender::Male,
      10,
      vec![
        record("Nevermind", "Nirvana", "ABC/111", 1991),
        record("Bleach", "Nirvana", "DEF/222", 1989),
      ],
    ),
    person(
      "Sven",
      "Vercauteren",
      "sven@example.com",
      (1983, 3, 21),
      Gender::Male,
      34,
      vec![record("Ænima", "Tool", "GHI/333", 1996)],
    ),
    person(
      "Nele",
      "Verheyen",
      "nele@example.com",
      (1982, 8, 16),
      Gender::Female,
      120,
      vec![
        record("Mezzanine", "Massive Attack", "JKL/444", 1998),
        record("Dummy", "Portishead", "MNO/555", 1994),
      ],
    ),
    person(
      "Nils",
      "Missorten",
      "nils@example.com",
      (1981, 7, 3),
      Gender::Male,
      23,
      vec![record("Kid A", "Radiohead", "PQR/666", 2000)],
    ),
    person(
      "Tim",
      "Van den Broeck",
      "tim@example.com",
      (1981, 12, 10),
      Gender::Male,
      19,
      Vec::new(),
    ),
  ];

  let mut person_ids = Vec::with_capacity(people.len());
  for input in people {
    person_ids.push(store.add_person(input).await?.person_id);
  }

  let mut shop = NewRecordStore::base("Oldies");
  shop.store_address = address("Oldstreet 12", "Antwerp", "2000");
  shop.tags = vec!["Rock".into(), "Pop".into(), "Vintage".into()];
  let oldies = store.add_record_store(shop).await?.record_store_id;

  let mut shop = NewRecordStore::base("Indie Heaven");
  shop.store_address = address("Nieuwstraat 4", "Brussels", "1000");
  shop.tags = vec!["Indie".into(), "Alternative".into()];
  let indie = store.add_record_store(shop).await?.record_store_id;

  let mut shop = NewRecordStore::specialized("Jazz Corner", "Jazz");
  shop.store_address = address("Veldstraat 89", "Ghent", "9000");
  shop.tags = vec!["Jazz".into(), "Blues".into()];
  let jazz = store.add_record_store(shop).await?.record_store_id;

  let mut shop = NewRecordStore::specialized("Metal Vault", "Metal");
  shop.store_address = address("Grote Markt 1", "Leuven", "3000");
  let metal = store.add_record_store(shop).await?.record_store_id;

  let ratings_to_add = [
    (oldies, person_ids[0], 4),
    (oldies, person_ids[1], 5),
    (oldies, person_ids[2], 3),
    (indie, person_ids[2], 2),
    (indie, person_ids[3], 3),
    (jazz, person_ids[0], 5),
    (jazz, person_ids[4], 4),
    (metal, person_ids[1], 1),
  ];
  let rating_count = ratings_to_add.len();
  for (record_store_id, person_id, value) in ratings_to_add {
    ratings::rate_with(store, record_store_id, person_id, value).await?;
  }

  tracing::info!(
    people = person_ids.len(),
    record_stores = 4,
    ratings = rating_count,
    "seeded demo catalog"
  );
  Ok(())
}
