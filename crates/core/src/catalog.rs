//! Static lookup tables and curated datasets.
//!
//! The catalog is loaded once at startup from a directory of JSON files and
//! is read-only afterwards, so it is shared behind an `Arc` without locking.
//!
//! | File                   | Shape                                   |
//! |------------------------|-----------------------------------------|
//! | `cityCodes.json`       | `{ city: IATA city code }`              |
//! | `capitalCities.json`   | `{ country: capital city }`             |
//! | `airlineCodes.json`    | `{ airline name: IATA airline code }`   |
//! | `travelData.json`      | `{ city: { destinations: [String] } }`  |
//! | `hotelData.json`       | `{ city: [Hotel] }`                     |
//! | `restaurantData.json`  | `{ city: [Restaurant] }`                |
//! | `carData.json`         | `{ city: [RentalCar] }`                 |
//!
//! All keys (and capital-city values) are normalized with
//! [`LocationKey::normalize`] on insert.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::location::LocationKey;
use crate::resolution::DataKind;

pub const CITY_CODES_FILE: &str = "cityCodes.json";
pub const CAPITAL_CITIES_FILE: &str = "capitalCities.json";
pub const AIRLINE_CODES_FILE: &str = "airlineCodes.json";
pub const TRAVEL_DATA_FILE: &str = "travelData.json";
pub const HOTEL_DATA_FILE: &str = "hotelData.json";
pub const RESTAURANT_DATA_FILE: &str = "restaurantData.json";
pub const CAR_DATA_FILE: &str = "carData.json";

/// Row `type` attached to every static travel destination.
const DESTINATION_TYPE: &str = "airport";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Curated travel entry: the top destinations reachable from a city.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TravelEntry {
    pub destinations: Vec<String>,
}

/// A single destination row as served in the static travel envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub destination: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub rating: f64,
    pub price: String,
    pub url: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub rating: f64,
    pub price: String,
    pub url: String,
    pub cuisine: String,
    pub image: String,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCar {
    pub company: String,
    pub price_per_day: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_type: Option<String>,
}

/// One row of a static dataset, serialized in its native shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StaticRow {
    Destination(Destination),
    Hotel(Hotel),
    Restaurant(Restaurant),
    Car(RentalCar),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure while loading the catalog from disk.
///
/// A missing file is not an error (the table starts empty); an unreadable or
/// malformed one is.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// In-memory static tables, immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    city_codes: HashMap<LocationKey, String>,
    capitals: HashMap<LocationKey, LocationKey>,
    airline_codes: HashMap<LocationKey, String>,
    travel: HashMap<LocationKey, TravelEntry>,
    hotels: HashMap<LocationKey, Vec<Hotel>>,
    restaurants: HashMap<LocationKey, Vec<Restaurant>>,
    cars: HashMap<LocationKey, Vec<RentalCar>>,
}

/// Table sizes, logged at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub city_codes: usize,
    pub capitals: usize,
    pub airline_codes: usize,
    pub travel: usize,
    pub hotels: usize,
    pub restaurants: usize,
    pub cars: usize,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Load every table from `dir`. See the module docs for file names.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let city_codes: HashMap<String, String> = read_table(dir, CITY_CODES_FILE)?;
        let capitals: HashMap<String, String> = read_table(dir, CAPITAL_CITIES_FILE)?;
        let airline_codes: HashMap<String, String> = read_table(dir, AIRLINE_CODES_FILE)?;
        let travel: HashMap<String, TravelEntry> = read_table(dir, TRAVEL_DATA_FILE)?;
        let hotels: HashMap<String, Vec<Hotel>> = read_table(dir, HOTEL_DATA_FILE)?;
        let restaurants: HashMap<String, Vec<Restaurant>> =
            read_table(dir, RESTAURANT_DATA_FILE)?;
        let cars: HashMap<String, Vec<RentalCar>> = read_table(dir, CAR_DATA_FILE)?;

        let mut builder = Self::builder();
        for (city, code) in city_codes {
            builder = builder.city_code(&city, &code);
        }
        for (country, capital) in capitals {
            builder = builder.capital(&country, &capital);
        }
        for (name, code) in airline_codes {
            builder = builder.airline(&name, &code);
        }
        for (city, entry) in travel {
            builder = builder.travel(&city, entry.destinations);
        }
        for (city, rows) in hotels {
            builder = builder.hotels(&city, rows);
        }
        for (city, rows) in restaurants {
            builder = builder.restaurants(&city, rows);
        }
        for (city, rows) in cars {
            builder = builder.cars(&city, rows);
        }

        Ok(builder.build())
    }

    /// Capital city for a country key, if the key names a known country.
    pub fn capital_of(&self, country: &LocationKey) -> Option<&LocationKey> {
        self.capitals.get(country)
    }

    /// IATA city code for a city key.
    pub fn city_code(&self, city: &LocationKey) -> Option<&str> {
        self.city_codes.get(city).map(String::as_str)
    }

    /// Canonical IATA airline code for an airline alias.
    pub fn airline_code(&self, airline: &LocationKey) -> Option<&str> {
        self.airline_codes.get(airline).map(String::as_str)
    }

    /// Curated rows for `kind` under `key`.
    ///
    /// An entry that exists but holds no rows is still a hit. Check-in links
    /// have no static table and always miss.
    pub fn static_rows(&self, kind: DataKind, key: &LocationKey) -> Option<Vec<StaticRow>> {
        match kind {
            DataKind::Travel => self.travel.get(key).map(|entry| {
                entry
                    .destinations
                    .iter()
                    .map(|d| {
                        StaticRow::Destination(Destination {
                            destination: d.clone(),
                            kind: DESTINATION_TYPE,
                        })
                    })
                    .collect()
            }),
            DataKind::Hotels => self
                .hotels
                .get(key)
                .map(|rows| rows.iter().cloned().map(StaticRow::Hotel).collect()),
            DataKind::Restaurants => self
                .restaurants
                .get(key)
                .map(|rows| rows.iter().cloned().map(StaticRow::Restaurant).collect()),
            DataKind::Cars => self
                .cars
                .get(key)
                .map(|rows| rows.iter().cloned().map(StaticRow::Car).collect()),
            DataKind::Checkin => None,
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            city_codes: self.city_codes.len(),
            capitals: self.capitals.len(),
            airline_codes: self.airline_codes.len(),
            travel: self.travel.len(),
            hotels: self.hotels.len(),
            restaurants: self.restaurants.len(),
            cars: self.cars.len(),
        }
    }
}

/// Read one JSON object table, treating a missing file as empty.
fn read_table<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<HashMap<String, T>, CatalogError> {
    let path = dir.join(file);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Static table not found, starting empty");
            return Ok(HashMap::new());
        }
        Err(source) => return Err(CatalogError::Io { path, source }),
    };

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse { path, source })
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Incremental [`Catalog`] construction. Blank keys are skipped.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn city_code(mut self, city: &str, code: &str) -> Self {
        if let Some(key) = normalized_or_skip(city) {
            self.catalog.city_codes.insert(key, code.trim().to_string());
        }
        self
    }

    pub fn capital(mut self, country: &str, capital: &str) -> Self {
        if let (Some(key), Some(value)) = (normalized_or_skip(country), normalized_or_skip(capital))
        {
            self.catalog.capitals.insert(key, value);
        }
        self
    }

    pub fn airline(mut self, name: &str, code: &str) -> Self {
        if let Some(key) = normalized_or_skip(name) {
            self.catalog.airline_codes.insert(key, code.trim().to_string());
        }
        self
    }

    pub fn travel<I, S>(mut self, city: &str, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(key) = normalized_or_skip(city) {
            let entry = TravelEntry {
                destinations: destinations.into_iter().map(Into::into).collect(),
            };
            self.catalog.travel.insert(key, entry);
        }
        self
    }

    pub fn hotels(mut self, city: &str, rows: Vec<Hotel>) -> Self {
        if let Some(key) = normalized_or_skip(city) {
            self.catalog.hotels.insert(key, rows);
        }
        self
    }

    pub fn restaurants(mut self, city: &str, rows: Vec<Restaurant>) -> Self {
        if let Some(key) = normalized_or_skip(city) {
            self.catalog.restaurants.insert(key, rows);
        }
        self
    }

    pub fn cars(mut self, city: &str, rows: Vec<RentalCar>) -> Self {
        if let Some(key) = normalized_or_skip(city) {
            self.catalog.cars.insert(key, rows);
        }
        self
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}

fn normalized_or_skip(raw: &str) -> Option<LocationKey> {
    let key = LocationKey::normalize(raw);
    if key.is_none() {
        tracing::warn!(raw, "Skipping blank static table key");
    }
    key
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn key(raw: &str) -> LocationKey {
        LocationKey::normalize(raw).unwrap()
    }

    #[test]
    fn builder_normalizes_keys_and_capital_values() {
        let catalog = Catalog::builder()
            .city_code("  New York ", "NYC")
            .capital("United  Kingdom", " London ")
            .build();

        assert_eq!(catalog.city_code(&key("new york")), Some("NYC"));
        assert_eq!(
            catalog.capital_of(&key("united kingdom")),
            Some(&key("london"))
        );
    }

    #[test]
    fn travel_rows_are_tagged_as_airports() {
        let catalog = Catalog::builder()
            .travel("london", ["Paris", "Rome"])
            .build();

        let rows = catalog.static_rows(DataKind::Travel, &key("london")).unwrap();
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "destination": "Paris", "type": "airport" },
                { "destination": "Rome", "type": "airport" },
            ])
        );
    }

    #[test]
    fn empty_entry_is_still_a_hit() {
        let catalog = Catalog::builder().cars("oslo", Vec::new()).build();
        let rows = catalog.static_rows(DataKind::Cars, &key("oslo"));
        assert_eq!(rows, Some(Vec::new()));
    }

    #[test]
    fn checkin_has_no_static_table() {
        let catalog = Catalog::builder().airline("ba", "BA").build();
        assert!(catalog.static_rows(DataKind::Checkin, &key("ba")).is_none());
    }

    #[test]
    fn restaurant_rows_keep_camel_case_fields() {
        let row = Restaurant {
            name: "Dishoom".into(),
            rating: 4.6,
            price: "££".into(),
            url: "https://www.dishoom.com/".into(),
            cuisine: "Indian".into(),
            image: "https://example.com/dishoom.jpg".into(),
            review_count: 12450,
        };
        let catalog = Catalog::builder().restaurants("London", vec![row]).build();

        let rows = catalog
            .static_rows(DataKind::Restaurants, &key("london"))
            .unwrap();
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["reviewCount"], 12450);
        assert_eq!(json[0]["cuisine"], "Indian");
    }

    #[test]
    fn load_dir_reads_tables_and_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CITY_CODES_FILE),
            r#"{ "London": "LON", "new york": "NYC" }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(TRAVEL_DATA_FILE),
            r#"{ "london": { "destinations": ["Paris"] } }"#,
        )
        .unwrap();

        let catalog = Catalog::load_dir(dir.path()).unwrap();
        let summary = catalog.summary();

        assert_eq!(summary.city_codes, 2);
        assert_eq!(summary.travel, 1);
        assert_eq!(summary.hotels, 0);
        assert_eq!(catalog.city_code(&key("london")), Some("LON"));
    }

    #[test]
    fn load_dir_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(AIRLINE_CODES_FILE), "{ not json").unwrap();

        let err = Catalog::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
