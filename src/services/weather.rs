//! Current weather lookup against the Open-Meteo forecast API.
//!
//! Every failure mode degrades to a placeholder report; callers never see
//! an error from this module.

use serde_json::Value;
use tracing::debug;

use crate::constants::{WEATHER_ENDPOINT, WEATHER_TIMEOUT};
use crate::models::Location;

/// Emoji used for every placeholder report.
const PLACEHOLDER_EMOJI: &str = "🌫️";

/// WMO weather interpretation codes: (code, description, emoji).
const WMO_CODES: &[(i64, &str, &str)] = &[
    (0, "Clear sky", "☀️"),
    (1, "Mainly clear", "🌤️"),
    (2, "Partly cloudy", "⛅"),
    (3, "Overcast", "☁️"),
    (45, "Fog", "🌫️"),
    (48, "Rime fog", "🌫️"),
    (51, "Light drizzle", "🌦️"),
    (53, "Moderate drizzle", "🌦️"),
    (55, "Dense drizzle", "🌧️"),
    (61, "Slight rain", "🌦️"),
    (63, "Moderate rain", "🌧️"),
    (65, "Heavy rain", "🌧️"),
    (71, "Slight snow", "🌨️"),
    (73, "Moderate snow", "🌨️"),
    (75, "Heavy snow", "❄️"),
    (80, "Rain showers", "🌧️"),
    (85, "Snow showers", "🌨️"),
    (95, "Thunderstorm", "⛈️"),
    (96, "Thunderstorm with hail", "⛈️"),
    (99, "Thunderstorm with heavy hail", "🌩️"),
];

/// Maps a WMO code to its description and emoji.
pub fn describe_code(code: i64) -> (&'static str, &'static str) {
    WMO_CODES
        .iter()
        .find(|(known, _, _)| *known == code)
        .map_or(("Unknown", PLACEHOLDER_EMOJI), |(_, desc, emoji)| {
            (*desc, *emoji)
        })
}

/// The weather group of substitution values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    /// e.g. `12.3°C Partly cloudy`
    pub text: String,
    /// e.g. `⛅`
    pub emoji: String,
}

impl WeatherReport {
    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emoji: PLACEHOLDER_EMOJI.to_string(),
        }
    }

    /// Report used when the provider is unreachable or answers non-200.
    pub fn unavailable() -> Self {
        Self::placeholder("Weather unavailable")
    }

    /// Builds a report from a forecast response body.
    pub fn from_body(body: &str) -> Self {
        let Ok(document) = serde_json::from_str::<Value>(body) else {
            return Self::placeholder("Weather error");
        };

        let Some(current) = document.get("current_weather").and_then(Value::as_object) else {
            return Self::placeholder("Weather data missing");
        };

        let Some(temperature) = current.get("temperature").and_then(Value::as_f64) else {
            return Self::placeholder("Weather data missing");
        };

        let (description, emoji) = current
            .get("weathercode")
            .and_then(Value::as_f64)
            .map_or(("Unknown", PLACEHOLDER_EMOJI), |code| {
                describe_code(code as i64)
            });

        Self {
            text: format!("{temperature:.1}°C {description}"),
            emoji: emoji.to_string(),
        }
    }
}

/// Blocking client for the current-conditions endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl WeatherClient {
    /// Creates a client for the public Open-Meteo endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(WEATHER_ENDPOINT)
    }

    /// Creates a client for a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(WEATHER_TIMEOUT).build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    /// Fetches current conditions at `location`.
    pub fn current(&self, location: Location) -> WeatherReport {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("latitude", &format!("{:.6}", location.latitude))
            .query("longitude", &format!("{:.6}", location.longitude))
            .query("current_weather", "true")
            .call();

        let response = match response {
            Ok(response) if response.status() == 200 => response,
            Ok(response) => {
                debug!("Weather provider answered HTTP {}", response.status());
                return WeatherReport::unavailable();
            }
            Err(e) => {
                debug!("Weather request failed: {e}");
                return WeatherReport::unavailable();
            }
        };

        match response.into_string() {
            Ok(body) => WeatherReport::from_body(&body),
            Err(e) => {
                debug!("Failed to read weather response: {e}");
                WeatherReport::placeholder("Weather error")
            }
        }
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}
