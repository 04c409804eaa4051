use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LookupError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    ///
    /// Latitude must lie in `-90..=90` and longitude in `-180..=180`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LookupError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LookupError::InvalidQuery(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LookupError::InvalidQuery(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }

        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the user asked for: a place name or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupQuery {
    ByName(String),
    ByCoordinates(Coordinates),
}

/// Primary weather classification, closed over the values we render.
///
/// The provider vocabulary is open-ended; anything unrecognised is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Rain,
    Clouds,
    Snow,
    Thunderstorm,
    Other,
}

impl Condition {
    /// Map a provider classification such as `"Clouds"` into the closed set.
    pub fn from_provider(value: &str) -> Self {
        match value {
            "Clear" => Condition::Clear,
            "Rain" => Condition::Rain,
            "Clouds" => Condition::Clouds,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            _ => Condition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Rain => "Rain",
            Condition::Clouds => "Clouds",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Other => "Other",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete weather reading, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    place: String,
    temperature_celsius: i32,
    condition: Condition,
    humidity_percent: u8,
    wind_kph: u32,
}

impl WeatherSnapshot {
    pub fn new(
        place: impl Into<String>,
        temperature_celsius: i32,
        condition: Condition,
        humidity_percent: u8,
        wind_kph: u32,
    ) -> Self {
        Self {
            place: place.into(),
            temperature_celsius,
            condition,
            humidity_percent,
            wind_kph,
        }
    }

    /// Fixed reading returned for the `demo` place name.
    pub fn demo() -> Self {
        Self::new("Demo City", 22, Condition::Rain, 45, 15)
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn temperature_celsius(&self) -> i32 {
        self.temperature_celsius
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn humidity_percent(&self) -> u8 {
        self.humidity_percent
    }

    pub fn wind_kph(&self) -> u32 {
        self.wind_kph
    }
}
