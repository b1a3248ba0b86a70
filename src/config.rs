//! Settings read from the environment.

use std::time::Duration;

use crate::directions::{DEFAULT_BASE_URL, DirectionsConfig};
use crate::error::ConfigError;
use crate::selection::{DEFAULT_PULSE, SelectionMode, SelectionOptions};
use crate::traits::DEFAULT_MAX_ROUTES;

/// Checked in order; the first non-empty value wins.
pub const API_KEY_VARS: [&str; 2] = ["GOOGLE_DIRECTIONS_API_KEY", "GOOGLE_MAPS_API_KEY"];

const BASE_URL_VAR: &str = "DIRECTIONS_BASE_URL";
const TIMEOUT_VAR: &str = "DIRECTIONS_TIMEOUT_SECS";
const MAX_ROUTES_VAR: &str = "DIRECTIONS_MAX_ROUTES";
const PULSE_VAR: &str = "ROUTE_SELECT_PULSE_MS";
const MODE_VAR: &str = "ROUTE_SELECTION_MODE";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Empty when unset; the client rejects requests without a key.
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_routes: usize,
    pub pulse: Duration,
    pub mode: SelectionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_routes: DEFAULT_MAX_ROUTES,
            pulse: DEFAULT_PULSE,
            mode: SelectionMode::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(key) = API_KEY_VARS.iter().find_map(|var| get(*var)) {
            settings.api_key = key;
        }
        if let Some(url) = get(BASE_URL_VAR) {
            settings.base_url = url;
        }
        if let Some(value) = get(TIMEOUT_VAR) {
            settings.timeout_secs = parse_number(TIMEOUT_VAR, &value)?;
        }
        if let Some(value) = get(MAX_ROUTES_VAR) {
            settings.max_routes = parse_number(MAX_ROUTES_VAR, &value)?;
            if settings.max_routes == 0 {
                return Err(invalid(MAX_ROUTES_VAR, &value));
            }
        }
        if let Some(value) = get(PULSE_VAR) {
            settings.pulse = Duration::from_millis(parse_number(PULSE_VAR, &value)?);
        }
        if let Some(value) = get(MODE_VAR) {
            settings.mode = SelectionMode::parse(&value).ok_or_else(|| invalid(MODE_VAR, &value))?;
        }

        Ok(settings)
    }

    pub fn directions_config(&self) -> DirectionsConfig {
        DirectionsConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            mode: self.mode,
            pulse: self.pulse,
            ..SelectionOptions::default()
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}
