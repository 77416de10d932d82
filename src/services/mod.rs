//! Service layer for the rotation loop's external collaborators.
//!
//! This module contains the live-value resolvers (time of day, weather),
//! the token substitution built on them, and the publisher that pushes a
//! resolved status to every configured account.

pub mod daylight;
pub mod publisher;
pub mod variables;
pub mod weather;

#[cfg(test)]
mod test_server;

// Re-export commonly used types and functions
pub use daylight::{DayPhase, SunTimes, TimeOfDay};
pub use publisher::{
    parse_credentials, AccountPublisher, CredentialSource, CustomStatus, HttpStatusClient,
    StatusClient, StatusPublisher,
};
pub use variables::{LiveVariables, VariableSource, Variables};
pub use weather::{WeatherClient, WeatherReport};
