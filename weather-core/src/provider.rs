use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Credential, GeoResult, WeatherObservation},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// The three provider calls a lookup is built from.
///
/// Implementations do no retries and classify HTTP statuses through
/// [`WeatherError::from_status`].
#[async_trait]
pub trait GeoWeatherSource: Send + Sync + Debug {
    /// Throwaway request whose only purpose is to surface 401/429 early.
    async fn probe_credential(&self, credential: &Credential) -> Result<(), WeatherError>;

    /// First geocoding candidate for `name`, or `None` when the provider has none.
    async fn geocode(
        &self,
        name: &str,
        credential: &Credential,
    ) -> Result<Option<GeoResult>, WeatherError>;

    /// Current conditions in metric units.
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        credential: &Credential,
    ) -> Result<WeatherObservation, WeatherError>;
}
