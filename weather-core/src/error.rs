use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can end a single weather lookup.
///
/// None of these are retried; the caller turns them into a message via
/// [`WeatherError::user_message`].
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid input '{name}': {reason}")]
    InvalidInput { name: String, reason: String },

    #[error("the API key was rejected by the provider")]
    InvalidCredential,

    #[error("the provider rate limit was exceeded")]
    RateLimited,

    #[error("location '{name}' not found")]
    LocationNotFound { name: String },

    #[error("no area named '{area}' found in city '{city}'")]
    AreaNotInCity { area: String, city: String },

    #[error("temperature {temperature}°C is outside the plausible range")]
    CorruptObservation { temperature: f64 },

    #[error("provider returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("transport error: {detail}")]
    Transport { detail: String },

    #[error("unexpected error: {detail}")]
    Unexpected { detail: String },
}

impl WeatherError {
    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => WeatherError::InvalidCredential,
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimited,
            other => WeatherError::Api {
                status: other.as_u16(),
                detail: truncate_body(body),
            },
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        WeatherError::Unexpected { detail: detail.into() }
    }

    /// Network-level failure: nothing usable came back from the provider.
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport { .. })
    }

    /// The provider answered with an error status.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            WeatherError::InvalidCredential | WeatherError::RateLimited | WeatherError::Api { .. }
        )
    }

    /// Rejected before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, WeatherError::InvalidInput { .. })
    }

    /// Human-readable text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::InvalidInput { .. } => {
                "Invalid input. Please enter valid city and area names.".to_string()
            }
            WeatherError::InvalidCredential => {
                "Error 401: Invalid API Key. Please check your API key.".to_string()
            }
            WeatherError::RateLimited => {
                "Error 429: API rate limit exceeded. Try again later.".to_string()
            }
            WeatherError::LocationNotFound { name } => format!("Location not found: {name}"),
            WeatherError::AreaNotInCity { area, city } => {
                format!("No area named '{area}' found in city '{city}'.")
            }
            WeatherError::CorruptObservation { .. } => {
                "Invalid temperature data received.".to_string()
            }
            WeatherError::Api { status: 404, .. } => "Error 404: Location not found.".to_string(),
            WeatherError::Api { status, detail } => {
                format!("HTTP error occurred (Status code: {status}): {detail}")
            }
            WeatherError::Transport { detail } => {
                format!("Could not reach the weather service: {detail}")
            }
            WeatherError::Unexpected { detail } => format!("An error occurred: {detail}"),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Unexpected { detail: err.to_string() }
        } else {
            WeatherError::Transport { detail: err.to_string() }
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Unexpected { detail: format!("malformed response: {err}") }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_and_429_are_classified() {
        assert!(matches!(
            WeatherError::from_status(StatusCode::UNAUTHORIZED, ""),
            WeatherError::InvalidCredential
        ));
        assert!(matches!(
            WeatherError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            WeatherError::RateLimited
        ));
    }

    #[test]
    fn other_statuses_keep_code_and_body() {
        let err = WeatherError::from_status(StatusCode::NOT_FOUND, "{\"cod\":\"404\"}");
        match &err {
            WeatherError::Api { status, detail } => {
                assert_eq!(*status, 404);
                assert!(detail.contains("404"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert_eq!(err.user_message(), "Error 404: Location not found.");
        assert!(err.is_api());
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(150);
        let err = WeatherError::from_status(StatusCode::BAD_GATEWAY, &body);
        let WeatherError::Api { detail, .. } = err else {
            panic!("expected Api variant");
        };
        assert!(detail.ends_with("..."));
        assert!(detail.len() <= 203);
    }

    #[test]
    fn error_classes_are_disjoint() {
        let local = WeatherError::InvalidInput { name: "x".into(), reason: "short".into() };
        let transport = WeatherError::Transport { detail: "timeout".into() };

        assert!(local.is_local() && !local.is_api() && !local.is_transport());
        assert!(transport.is_transport() && !transport.is_api() && !transport.is_local());
        assert!(WeatherError::RateLimited.is_api());
    }

    #[test]
    fn area_message_names_both_places() {
        let err = WeatherError::AreaNotInCity { area: "Springfield".into(), city: "Paris".into() };
        assert_eq!(err.user_message(), "No area named 'Springfield' found in city 'Paris'.");
    }
}
