use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can terminate a run.
///
/// Every variant is terminal. The binary prints the message and exits
/// non-zero; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The geolocation or geocoding request never completed.
    #[error(
        "There was an error getting your location. Please make sure you're connected to the internet."
    )]
    LocationUnreachable(#[source] reqwest::Error),

    /// The weather request never completed.
    #[error(
        "There was an error getting the weather forecast. Make sure you're connected to the internet.\nContact the developers if the issue persists."
    )]
    WeatherUnreachable(#[source] reqwest::Error),

    /// The FORECAST argument is outside the supported set.
    #[error("Invalid value '{0}' for argument 'forecast'. Options are: now, today, tomorrow, week.")]
    InvalidForecast(String),

    /// A city name produced no geocoding match.
    #[error(
        "Could not find a place named '{0}'.\nHint: check the spelling, or use 'here' for the weather at your current location."
    )]
    PlaceNotFound(String),

    /// An upstream service answered with a non-success status.
    #[error("{service} request failed with status {status}: {body}")]
    UpstreamStatus {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// An upstream body decoded, but not into the fields we need.
    #[error("Failed to parse the {service} response: {source}")]
    MalformedResponse {
        service: &'static str,
        source: serde_json::Error,
    },

    /// No API key in the environment.
    #[error(
        "No OpenWeatherMap API key configured.\nHint: set the WEATHER_API_KEY environment variable (or add it to a .env file)."
    )]
    MissingApiKey,
}

impl Error {
    /// Build an `UpstreamStatus`, quoting at most `MAX_BODY` characters of the
    /// body so a misbehaving service cannot flood the terminal.
    pub(crate) fn upstream(service: &'static str, status: StatusCode, body: &str) -> Self {
        const MAX_BODY: usize = 200;
        let body = match body.char_indices().nth(MAX_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Error::UpstreamStatus {
            service,
            status,
            body,
        }
    }
}
