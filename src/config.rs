use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::UploadError;

/// Where the form sends its submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Hand submissions to the upload endpoint in-process.
    Endpoint,
    /// Wait the delay and acknowledge without touching the endpoint.
    Simulated,
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "endpoint" => Ok(SubmitMode::Endpoint),
            "simulated" => Ok(SubmitMode::Simulated),
            other => Err(format!("unknown submit mode {:?}", other)),
        }
    }
}

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// How long the form waits before handing a submission to the endpoint.
    pub submit_delay: Duration,
    pub submit_mode: SubmitMode,
    /// Advertised on the page only, never enforced.
    pub max_images: usize,
    pub max_payload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            submit_delay: Duration::from_millis(2000),
            submit_mode: SubmitMode::Endpoint,
            max_images: 3,
            max_payload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for anything unset. `.env` should already be loaded.
    pub fn from_env() -> Result<Self, UploadError> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            submit_delay: Duration::from_millis(parse_var(
                "SUBMIT_DELAY_MS",
                defaults.submit_delay.as_millis() as u64,
            )?),
            submit_mode: match env::var("SUBMIT_MODE") {
                Ok(raw) => raw.parse().map_err(UploadError::ConfigError)?,
                Err(_) => defaults.submit_mode,
            },
            max_images: parse_var("MAX_IMAGES", defaults.max_images)?,
            max_payload_bytes: parse_var("MAX_PAYLOAD_BYTES", defaults.max_payload_bytes)?,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, UploadError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            UploadError::ConfigError(format!("{} must be a valid number, got {:?}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}
