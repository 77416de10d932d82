//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including names, default locations, and timing values.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Status Rotator";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "status-rotator";

/// Default directory holding the three configuration documents.
pub const DEFAULT_CONFIG_DIR: &str = "configuration";

/// Environment variable holding the account credentials.
pub const CREDENTIALS_ENV_VAR: &str = "DISCORD_TOKENS";

/// Environment variable that disables the configuration web server.
pub const NO_WEB_ENV_VAR: &str = "NO_WEB";

/// Coordinate used when the settings carry no location (Brussels).
pub const FALLBACK_LATITUDE: f64 = 50.8503;

/// Longitude half of the fallback coordinate.
pub const FALLBACK_LONGITUDE: f64 = 4.3517;

/// Wait applied when no settings entry is present.
pub const IDLE_BACKOFF: Duration = Duration::from_secs(5);

/// Timeout for the weather provider request.
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for a single status update request.
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(10);

/// Current-conditions endpoint of the weather provider.
pub const WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Account settings endpoint receiving the custom status.
pub const STATUS_ENDPOINT: &str = "https://discord.com/api/v10/users/@me/settings";
