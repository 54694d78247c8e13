use crate::{
    error::WeatherError,
    glyph::glyph_for,
    model::{Credential, DisplayPayload, LocationQuery, ResolverPolicy},
    provider::GeoWeatherSource,
};

/// Lookup context: built once at startup, read-only afterwards.
#[derive(Debug)]
pub struct LocationWeatherResolver<S> {
    source: S,
    credential: Credential,
    policy: ResolverPolicy,
}

impl<S: GeoWeatherSource> LocationWeatherResolver<S> {
    pub fn new(source: S, credential: Credential, policy: ResolverPolicy) -> Self {
        Self { source, credential, policy }
    }

    /// City (and optional area) to current conditions.
    ///
    /// Calls go out one at a time: credential probe, city geocode, area
    /// geocode (only with a non-blank `area`), then current weather.
    pub async fn resolve(
        &self,
        city: &str,
        area: Option<&str>,
    ) -> Result<DisplayPayload, WeatherError> {
        let city = LocationQuery::parse(city, &self.policy)?;
        let area = LocationQuery::parse_optional(area, &self.policy)?;

        self.source.probe_credential(&self.credential).await?;

        let city_geo = self
            .source
            .geocode(city.as_str(), &self.credential)
            .await?
            .ok_or_else(|| WeatherError::LocationNotFound { name: city.to_string() })?;

        let (latitude, longitude) = match &area {
            Some(area) => {
                let area_geo = self
                    .source
                    .geocode(area.as_str(), &self.credential)
                    .await?
                    .ok_or_else(|| WeatherError::LocationNotFound { name: area.to_string() })?;

                if !city_geo.same_region(&area_geo, self.policy.case_sensitive_area_match) {
                    tracing::debug!(
                        city_state = %city_geo.state,
                        city_country = %city_geo.country,
                        area_state = %area_geo.state,
                        area_country = %area_geo.country,
                        "area lies outside city region"
                    );
                    return Err(WeatherError::AreaNotInCity {
                        area: area.to_string(),
                        city: city.to_string(),
                    });
                }

                (area_geo.latitude, area_geo.longitude)
            }
            None => (city_geo.latitude, city_geo.longitude),
        };

        let observation =
            self.source.current_weather(latitude, longitude, &self.credential).await?;

        if !observation.is_plausible() {
            return Err(WeatherError::CorruptObservation {
                temperature: observation.temperature_c,
            });
        }

        tracing::info!(
            city = %city,
            area = area.as_ref().map(LocationQuery::as_str).unwrap_or(""),
            temperature_c = observation.temperature_c,
            "weather lookup complete"
        );

        Ok(DisplayPayload {
            city: city.to_string(),
            area: area.map(|a| a.to_string()),
            state: city_geo.state,
            country: city_geo.country,
            temperature_c: observation.temperature_c,
            glyph: glyph_for(&observation.icon_code).to_string(),
            description: observation.description,
            observed_at: observation.observed_at,
        })
    }
}
