use thiserror::Error;

/// Failures below the domain level: the request never produced usable data.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Closed set of failures a weather fetch can end in.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Upstream answered 404 for the query.
    #[error("City not found")]
    CityNotFound,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No usable API credential. Fatal for the session.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A forecast was requested before any coordinate was resolved.
    #[error("No coordinate available for forecast request")]
    NoCoordinateAvailable,
}

impl WeatherError {
    /// Whether the user can meaningfully try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WeatherError::CityNotFound | WeatherError::Transport(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Transport(TransportError::Network(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(WeatherError::CityNotFound.is_retryable());
        assert!(
            WeatherError::Transport(TransportError::Status { status: 500, body: String::new() })
                .is_retryable()
        );
        assert!(!WeatherError::Config("missing".into()).is_retryable());
        assert!(!WeatherError::NoCoordinateAvailable.is_retryable());
    }

    #[test]
    fn transport_message_is_surfaced_verbatim() {
        let err = WeatherError::from(TransportError::Status {
            status: 503,
            body: "maintenance".into(),
        });
        assert_eq!(err.to_string(), "Upstream returned status 503: maintenance");
    }
}
