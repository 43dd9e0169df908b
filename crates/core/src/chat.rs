//! Rule-based chat intents.
//!
//! A message is matched against a short, ordered list of intent patterns.
//! The first whose trigger word appears wins; the pattern then extracts the
//! city the user asked about, if any. Dispatching an intent to a data source
//! happens in the HTTP layer.

use std::sync::LazyLock;

use regex::Regex;

use crate::location::LocationKey;

pub const REPLY_NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that.";
pub const REPLY_WEATHER_NEEDS_CITY: &str = "Please specify a city (e.g., 'weather in Paris').";
pub const REPLY_WEATHER_FAILED: &str = "I couldn't fetch the weather. Try another city!";
pub const REPLY_TRAVEL_NEEDS_CITY: &str = "Please specify a city (e.g., 'travel from London').";
pub const REPLY_TRAVEL_FAILED: &str = "Error fetching travel info. Try another city.";

static WEATHER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"weather in (.+)").expect("valid regex"));
static TRAVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"travel from (.+)").expect("valid regex"));

/// A city mentioned in a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityMention {
    /// The text as captured (lowercased, trimmed), used in replies.
    pub raw: String,
    /// Lookup key: dots removed, whitespace collapsed.
    pub key: LocationKey,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `weather in <city>`; `None` when the city is missing.
    Weather(Option<CityMention>),
    /// `travel from <city>`; `None` when the city is missing.
    Travel(Option<CityMention>),
    Unknown,
}

/// Which intent a trigger selects.
#[derive(Clone, Copy)]
enum IntentTag {
    Weather,
    Travel,
}

struct IntentPattern {
    trigger: &'static str,
    capture: &'static LazyLock<Regex>,
    tag: IntentTag,
}

/// Checked in order; the first matching trigger decides the intent.
static PATTERNS: [IntentPattern; 2] = [
    IntentPattern {
        trigger: "weather",
        capture: &WEATHER_RE,
        tag: IntentTag::Weather,
    },
    IntentPattern {
        trigger: "travel from",
        capture: &TRAVEL_RE,
        tag: IntentTag::Travel,
    },
];

impl Intent {
    pub fn parse(message: &str) -> Self {
        let lower = message.to_lowercase();

        let Some(pattern) = PATTERNS.iter().find(|p| lower.contains(p.trigger)) else {
            return Intent::Unknown;
        };

        let mention = pattern
            .capture
            .captures(&lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| city_mention(m.as_str()));

        match pattern.tag {
            IntentTag::Weather => Intent::Weather(mention),
            IntentTag::Travel => Intent::Travel(mention),
        }
    }
}

fn city_mention(captured: &str) -> Option<CityMention> {
    let raw = captured.trim();
    let key = LocationKey::normalize(&raw.replace('.', ""))?;
    Some(CityMention {
        raw: raw.to_string(),
        key,
    })
}

// ---------------------------------------------------------------------------
// Reply formatting
// ---------------------------------------------------------------------------

/// Summarize an OpenWeather current-conditions payload.
///
/// Returns `None` if the payload lacks the name, temperature, or description.
pub fn weather_reply(payload: &serde_json::Value) -> Option<String> {
    let name = payload.get("name")?.as_str()?;
    let temp = payload.get("main")?.get("temp")?.as_f64()?;
    let description = payload
        .get("weather")?
        .get(0)?
        .get("description")?
        .as_str()?;
    Some(format!("The weather in {name} is {temp}°C, {description}."))
}

/// Summarize a travel payload (static envelope or live provider shape, both
/// carry `data[].destination`).
pub fn travel_reply(raw_city: &str, payload: &serde_json::Value) -> String {
    let destinations: Vec<&str> = payload
        .get("data")
        .and_then(serde_json::Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get("destination").and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if destinations.is_empty() {
        format!("No travel info found for {raw_city}.")
    } else {
        format!("Top destinations from {raw_city}: {}", destinations.join(", "))
    }
}

pub fn travel_not_found_reply(raw_city: &str) -> String {
    format!("Sorry, I don't have travel info for {raw_city}.")
}
