use crate::config::OpenWeatherMapConfig;
use crate::error::{CropwiseError, Result};
use crate::models::CurrentWeather;
use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/weather", API_BASE_URL),
            &[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "imperial"),
            ],
        )
        .map_err(|e| CropwiseError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    /// Fetch current conditions for a city, imperial units
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeather> {
        let url = self.current_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropwiseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropwiseError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            CropwiseError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        let weather = convert_response(city, owm_response);
        tracing::info!(
            city = %weather.city,
            temp_f = weather.temperature_f,
            "Fetched current weather"
        );
        Ok(weather)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, city: &str) -> Result<bool> {
        let url = self.current_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                CropwiseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

fn convert_response(city: &str, response: OwmCurrentResponse) -> CurrentWeather {
    let description = response
        .weather
        .first()
        .map(|w| capitalize(&w.description))
        .unwrap_or_default();

    CurrentWeather {
        city: response
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| city.to_string()),
        description,
        temperature_f: response.main.temp,
        humidity_percent: response.main.humidity,
        wind_speed_mph: response.wind.speed,
        fetched_at: Utc::now(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
