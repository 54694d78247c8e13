use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::Config,
    error::WeatherError,
    model::{Credential, GeoResult, WeatherObservation},
};

use super::GeoWeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// City used by the credential probe; any well-known name works.
const PROBE_CITY: &str = "London";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and hand back the status with the raw body.
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let (status, body) = self.get(path, query).await?;

        if !status.is_success() {
            tracing::warn!(%status, path, "OpenWeather request failed");
            return Err(WeatherError::from_status(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl GeoWeatherSource for OpenWeatherClient {
    async fn probe_credential(&self, credential: &Credential) -> Result<(), WeatherError> {
        tracing::debug!("probing OpenWeather credential");

        let (status, body) = self
            .get(
                "/data/2.5/weather",
                &[("q", PROBE_CITY), ("appid", credential.expose())],
            )
            .await?;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!(%status, "credential probe rejected");
                Err(WeatherError::from_status(status, &body))
            }
            // Only 401 and 429 mean anything here.
            _ => Ok(()),
        }
    }

    async fn geocode(
        &self,
        name: &str,
        credential: &Credential,
    ) -> Result<Option<GeoResult>, WeatherError> {
        tracing::debug!(name, "geocoding");

        let entries: Vec<OwGeoEntry> = self
            .get_json("/geo/1.0/direct", &[("q", name), ("appid", credential.expose())])
            .await?;

        Ok(entries.into_iter().next().map(|e| GeoResult {
            latitude: e.lat,
            longitude: e.lon,
            state: e.state.unwrap_or_default(),
            country: e.country.unwrap_or_default(),
        }))
    }

    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        credential: &Credential,
    ) -> Result<WeatherObservation, WeatherError> {
        tracing::debug!(latitude, longitude, "fetching current weather");

        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let parsed: OwCurrentResponse = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", credential.expose()),
                    ("units", "metric"),
                ],
            )
            .await?;

        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::unexpected("weather response contained no conditions"))?;

        Ok(WeatherObservation {
            temperature_c: parsed.main.temp,
            description: weather.description,
            icon_code: weather.icon,
            observed_at: parsed.dt.and_then(unix_to_utc),
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
