//! `{{token}}` substitution with live time and weather values.

use chrono::Local;

use crate::models::Location;
use crate::services::daylight::TimeOfDay;
use crate::services::weather::WeatherClient;

/// Token replaced by the day-phase emoji.
pub const TIME_EMOJI: &str = "{{time_emoji}}";
/// Token replaced by the day-phase label.
pub const TIME_TEXT: &str = "{{time_text}}";
/// Token replaced by the 12-hour clock reading.
pub const TIMESTAMP_TEXT: &str = "{{timestamp_text}}";
/// Token replaced by the weather emoji.
pub const WEATHER_EMOJI: &str = "{{weather_emoji}}";
/// Token replaced by the temperature and description.
pub const WEATHER_TEXT: &str = "{{weather_text}}";

/// One resolved set of substitution values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    /// Value for `{{time_emoji}}`
    pub time_emoji: String,
    /// Value for `{{time_text}}`
    pub time_text: String,
    /// Value for `{{timestamp_text}}`
    pub timestamp_text: String,
    /// Value for `{{weather_emoji}}`
    pub weather_emoji: String,
    /// Value for `{{weather_text}}`
    pub weather_text: String,
}

impl Variables {
    fn tokens(&self) -> [(&'static str, &str); 5] {
        [
            (TIME_EMOJI, self.time_emoji.as_str()),
            (TIME_TEXT, self.time_text.as_str()),
            (TIMESTAMP_TEXT, self.timestamp_text.as_str()),
            (WEATHER_EMOJI, self.weather_emoji.as_str()),
            (WEATHER_TEXT, self.weather_text.as_str()),
        ]
    }

    /// Replaces every known token in `input`.
    ///
    /// The input is scanned once, so values are never re-scanned for tokens
    /// and the result does not depend on replacement order. Unknown
    /// `{{...}}` sequences are copied verbatim.
    pub fn substitute(&self, input: &str) -> String {
        let tokens = self.tokens();
        let mut output = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let candidate = &rest[start..];

            match tokens.iter().find(|(token, _)| candidate.starts_with(*token)) {
                Some((token, value)) => {
                    output.push_str(value);
                    rest = &candidate[token.len()..];
                }
                None => {
                    output.push_str("{{");
                    rest = &candidate[2..];
                }
            }
        }

        output.push_str(rest);
        output
    }

    /// Substitutes both halves of a status.
    pub fn apply(&self, emoji: &str, text: &str) -> (String, String) {
        (self.substitute(emoji), self.substitute(text))
    }
}

/// Source of substitution values for a location.
pub trait VariableSource {
    /// Resolves the current values at `location`.
    fn resolve(&self, location: Location) -> Variables;
}

/// Resolves values from the local clock and the weather provider.
#[derive(Debug, Clone, Default)]
pub struct LiveVariables {
    weather: WeatherClient,
}

impl LiveVariables {
    /// Creates a resolver using the public weather endpoint.
    pub fn new() -> Self {
        Self::with_weather(WeatherClient::new())
    }

    /// Creates a resolver around a specific weather client.
    pub fn with_weather(weather: WeatherClient) -> Self {
        Self { weather }
    }
}

impl VariableSource for LiveVariables {
    fn resolve(&self, location: Location) -> Variables {
        let time = TimeOfDay::at(location, &Local::now());
        let weather = self.weather.current(location);

        Variables {
            time_emoji: time.phase.emoji().to_string(),
            time_text: time.phase.label().to_string(),
            timestamp_text: time.timestamp,
            weather_emoji: weather.emoji,
            weather_text: weather.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Variables {
        Variables {
            time_emoji: "🌅".to_string(),
            time_text: "Morning".to_string(),
            timestamp_text: "07:15 AM".to_string(),
            weather_emoji: "☁️".to_string(),
            weather_text: "8.0°C Overcast".to_string(),
        }
    }

    #[test]
    fn test_substitute_all_tokens() {
        let vars = sample();
        assert_eq!(
            vars.substitute("{{time_text}} at {{timestamp_text}}, {{weather_text}}"),
            "Morning at 07:15 AM, 8.0°C Overcast"
        );
        assert_eq!(vars.substitute("{{time_emoji}}{{weather_emoji}}"), "🌅☁️");
    }

    #[test]
    fn test_substitute_repeated_tokens() {
        let vars = sample();
        assert_eq!(
            vars.substitute("{{time_text}}/{{time_text}}/{{time_text}}"),
            "Morning/Morning/Morning"
        );
    }

    #[test]
    fn test_substitute_without_tokens_is_identity() {
        let vars = sample();
        for input in ["", "plain text", "braces { } and }} {", "multi\nline"] {
            assert_eq!(vars.substitute(input), input);
        }
    }

    #[test]
    fn test_unknown_tokens_left_verbatim() {
        let vars = sample();
        assert_eq!(
            vars.substitute("{{mood}} {{time_text}} {{"),
            "{{mood}} Morning {{"
        );
        assert_eq!(vars.substitute("{{{{time_text}}"), "{{Morning");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let vars = Variables {
            time_text: "{{weather_text}}".to_string(),
            weather_text: "rain".to_string(),
            ..Variables::default()
        };
        assert_eq!(vars.substitute("{{time_text}}"), "{{weather_text}}");
    }

    #[test]
    fn test_apply_substitutes_emoji_and_text() {
        let (emoji, text) = sample().apply("{{weather_emoji}}", "It is {{time_text}}");
        assert_eq!(emoji, "☁️");
        assert_eq!(text, "It is Morning");
    }
}
