use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city, imperial units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub description: String,
    pub temperature_f: f64,
    pub humidity_percent: f64,
    pub wind_speed_mph: f64,
    pub fetched_at: DateTime<Utc>,
}

impl CurrentWeather {
    pub fn new(city: impl Into<String>, temperature_f: f64) -> Self {
        Self {
            city: city.into(),
            description: String::new(),
            temperature_f,
            humidity_percent: 0.0,
            wind_speed_mph: 0.0,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
