//! Multi-source data resolution.
//!
//! Answers "give me data of kind K for location L" by choosing, in a fixed
//! order, between a curated static dataset, a live provider call, and a
//! static fallback:
//!
//! 1. normalize the key (blank input is a validation error);
//! 2. travel only: redirect a country name to its capital city;
//! 3. a static entry for the kind wins outright, with no live call;
//! 4. kinds without a live endpoint stop here with not-found;
//!    otherwise resolve a provider code (city-code table, or for check-in
//!    the airline alias table with an upper-cased best-effort fallback);
//! 5. call the live provider and pass its payload through unchanged;
//! 6. travel only: on live failure, retry the static table before failing.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, StaticRow};
use crate::error::CoreError;
use crate::location::LocationKey;
use crate::provider::{LiveEndpoint, LiveProvider, ProviderError};

// ---------------------------------------------------------------------------
// Data kinds
// ---------------------------------------------------------------------------

/// The kinds of data the resolver can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Travel,
    Hotels,
    Restaurants,
    Cars,
    Checkin,
}

/// How a key is turned into a provider code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeLookup {
    /// City-code table; a miss is not-found.
    CityCode,
    /// Airline alias table; a miss falls back to the upper-cased key.
    AirlineOrUppercase,
}

impl DataKind {
    pub fn label(self) -> &'static str {
        match self {
            DataKind::Travel => "travel",
            DataKind::Hotels => "hotels",
            DataKind::Restaurants => "restaurants",
            DataKind::Cars => "cars",
            DataKind::Checkin => "checkin",
        }
    }

    /// Validation message for blank input.
    pub fn required_message(self) -> &'static str {
        match self {
            DataKind::Checkin => "Airline code is required",
            _ => "City is required",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            DataKind::Travel | DataKind::Hotels => "City not found in our database",
            DataKind::Restaurants => "No restaurant data for this city",
            DataKind::Cars => "No car rental data for this city",
            DataKind::Checkin => "Airline not found",
        }
    }

    /// Caller-facing message when the live path fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            DataKind::Travel => "Failed to fetch travel data",
            DataKind::Hotels => "Failed to fetch hotel data",
            DataKind::Restaurants => "Failed to fetch restaurant data",
            DataKind::Cars => "Failed to fetch car rental data",
            DataKind::Checkin => "Failed to fetch check-in links",
        }
    }

    /// Live endpoint for this kind; `None` for static-only kinds.
    pub fn live_endpoint(self) -> Option<LiveEndpoint> {
        match self {
            DataKind::Travel => Some(LiveEndpoint::FlightDestinations),
            DataKind::Hotels => Some(LiveEndpoint::HotelsByCity),
            DataKind::Checkin => Some(LiveEndpoint::CheckinLinks),
            DataKind::Restaurants | DataKind::Cars => None,
        }
    }

    fn applies_capital_alias(self) -> bool {
        self == DataKind::Travel
    }

    fn falls_back_to_static(self) -> bool {
        self == DataKind::Travel
    }

    fn code_lookup(self) -> CodeLookup {
        match self {
            DataKind::Checkin => CodeLookup::AirlineOrUppercase,
            _ => CodeLookup::CityCode,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Provenance tag surfaced in the `meta.source` field of static envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    StaticData,
    StaticDataFallback,
}

/// Successful outcome of [`ResolutionPolicy::resolve`].
///
/// The not-found outcome is reported as [`CoreError::NotFound`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    StaticHit(Vec<StaticRow>),
    LiveHit(serde_json::Value),
    LiveFailureStaticFallback(Vec<StaticRow>),
}

impl Resolution {
    /// `None` for pure live data.
    pub fn source(&self) -> Option<DataSource> {
        match self {
            Resolution::StaticHit(_) => Some(DataSource::StaticData),
            Resolution::LiveHit(_) => None,
            Resolution::LiveFailureStaticFallback(_) => Some(DataSource::StaticDataFallback),
        }
    }

    /// Shape the result for the wire.
    ///
    /// Static rows get a `{ data, meta: { count, source } }` envelope; live
    /// payloads are passed through in the provider's native shape.
    pub fn into_envelope(self) -> Envelope {
        let (rows, source) = match self {
            Resolution::LiveHit(payload) => return Envelope::Passthrough(payload),
            Resolution::StaticHit(rows) => (rows, DataSource::StaticData),
            Resolution::LiveFailureStaticFallback(rows) => (rows, DataSource::StaticDataFallback),
        };

        Envelope::Static {
            meta: Meta {
                count: rows.len(),
                source,
            },
            data: rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub count: usize,
    pub source: DataSource,
}

/// Wire form of a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Static { data: Vec<StaticRow>, meta: Meta },
    Passthrough(serde_json::Value),
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Static-first resolver over a [`Catalog`] and a [`LiveProvider`].
#[derive(Clone)]
pub struct ResolutionPolicy {
    catalog: Arc<Catalog>,
    provider: Arc<dyn LiveProvider>,
}

impl ResolutionPolicy {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn LiveProvider>) -> Self {
        Self { catalog, provider }
    }

    /// Resolve `raw_key` for `kind`. See the module docs for the order.
    pub async fn resolve(&self, kind: DataKind, raw_key: &str) -> Result<Resolution, CoreError> {
        let mut key = LocationKey::parse(raw_key, kind.required_message())?;

        if kind.applies_capital_alias() {
            if let Some(capital) = self.catalog.capital_of(&key) {
                tracing::debug!(country = %key, capital = %capital, "Resolved country to capital");
                key = capital.clone();
            }
        }

        if let Some(rows) = self.catalog.static_rows(kind, &key) {
            tracing::debug!(kind = kind.label(), key = %key, rows = rows.len(), "Static data hit");
            return Ok(Resolution::StaticHit(rows));
        }

        let Some(endpoint) = kind.live_endpoint() else {
            return Err(CoreError::NotFound(kind.not_found_message().to_string()));
        };

        let code = match kind.code_lookup() {
            CodeLookup::CityCode => self
                .catalog
                .city_code(&key)
                .map(str::to_string)
                .ok_or_else(|| CoreError::NotFound(kind.not_found_message().to_string()))?,
            CodeLookup::AirlineOrUppercase => self
                .catalog
                .airline_code(&key)
                .map(str::to_string)
                .unwrap_or_else(|| key.to_code_guess()),
        };

        tracing::info!(kind = kind.label(), key = %key, code = %code, "Calling live provider");

        match self.provider.fetch(endpoint, &code).await {
            Ok(payload) => Ok(Resolution::LiveHit(payload)),
            Err(err) => {
                tracing::warn!(kind = kind.label(), code = %code, error = %err, "Live provider call failed");

                // Same table and key as the static check above, so this only
                // fires if that check is ever narrowed. Kept deliberately.
                if kind.falls_back_to_static() {
                    if let Some(rows) = self.catalog.static_rows(kind, &key) {
                        return Ok(Resolution::LiveFailureStaticFallback(rows));
                    }
                }

                Err(provider_failure(kind, err))
            }
        }
    }
}

/// Translate a provider failure into the domain taxonomy for `kind`.
fn provider_failure(kind: DataKind, err: ProviderError) -> CoreError {
    let context = kind.failure_message().to_string();
    match err {
        ProviderError::Unconfigured => CoreError::Auth {
            context,
            detail: err.to_string(),
        },
        ProviderError::Auth(detail) => CoreError::Auth { context, detail },
        other => CoreError::Upstream {
            context,
            message: other.public_message().map(str::to_string),
            detail: other.to_string(),
        },
    }
}
