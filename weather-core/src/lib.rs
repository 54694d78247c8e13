//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credential storage
//! - The OpenWeatherMap geocoding / current-weather client
//! - `LocationWeatherResolver`, which turns a city (and optional area) into
//!   a display payload with an emoji glyph
//! - The error taxonomy shown to users
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod credential;
pub mod error;
pub mod glyph;
pub mod model;
pub mod provider;
pub mod resolver;

pub use config::Config;
pub use credential::CredentialStore;
pub use error::WeatherError;
pub use model::{Credential, DisplayPayload, GeoResult, LocationQuery, ResolverPolicy, WeatherObservation};
pub use provider::{GeoWeatherSource, OpenWeatherClient};
pub use resolver::LocationWeatherResolver;
