use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

use crate::error::WeatherError;

/// Letters (any script) and spaces only.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("static regex is valid"));

/// Plausible range for a surface temperature in °C, both ends inclusive.
pub const MIN_TEMPERATURE_C: f64 = -100.0;
pub const MAX_TEMPERATURE_C: f64 = 60.0;

/// Provider API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Trims the raw key; `None` when nothing is left.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Knobs that reconcile the two historical input/matching behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverPolicy {
    /// Compare area and city state/country byte-for-byte instead of ignoring case.
    pub case_sensitive_area_match: bool,
    /// Reject names shorter than `min_name_len` or containing non-letters.
    pub require_alphabetic_input: bool,
    pub min_name_len: usize,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            case_sensitive_area_match: false,
            require_alphabetic_input: true,
            min_name_len: 3,
        }
    }
}

/// A validated, trimmed place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn parse(raw: &str, policy: &ResolverPolicy) -> Result<Self, WeatherError> {
        let name = raw.trim();
        let invalid = |reason: String| WeatherError::InvalidInput {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }

        if policy.require_alphabetic_input {
            if name.chars().count() < policy.min_name_len {
                return Err(invalid(format!(
                    "name must be at least {} characters",
                    policy.min_name_len
                )));
            }
            if !NAME_PATTERN.is_match(name) {
                return Err(invalid("only letters and spaces are allowed".to_string()));
            }
        }

        Ok(Self(name.to_string()))
    }

    /// Like [`LocationQuery::parse`], but blank input means "no area".
    pub fn parse_optional(
        raw: Option<&str>,
        policy: &ResolverPolicy,
    ) -> Result<Option<Self>, WeatherError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => Self::parse(name, policy).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First geocoding candidate for a name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub state: String,
    pub country: String,
}

impl GeoResult {
    /// Whether `other` lies in the same state and country as `self`.
    pub fn same_region(&self, other: &GeoResult, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.state == other.state && self.country == other.country
        } else {
            self.state.to_lowercase() == other.state.to_lowercase()
                && self.country.to_lowercase() == other.country.to_lowercase()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherObservation {
    pub fn is_plausible(&self) -> bool {
        (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&self.temperature_c)
    }
}

/// What a successful lookup hands to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    pub city: String,
    pub area: Option<String>,
    pub state: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
    pub glyph: String,
    pub observed_at: Option<DateTime<Utc>>,
}

impl DisplayPayload {
    /// "State, CC", skipping whichever part the provider left empty.
    pub fn region(&self) -> String {
        [self.state.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DisplayPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {} ({})", self.city, self.region())?;
        writeln!(f, "Area: {}", self.area.as_deref().unwrap_or(""))?;
        writeln!(f, "Temperature: {:.1}°C", self.temperature_c)?;
        write!(f, "Description: {}", self.description)
    }
}
