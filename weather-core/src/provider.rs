use crate::{Config, LookupError, LookupQuery, WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// A source of current weather readings.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LookupQuery) -> Result<WeatherSnapshot, LookupError>;
}

/// Build the shared HTTP client, applying the configured timeout if any.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: offline lookups (`demo`) still work,
/// and the provider itself reports the rejected request.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let http = http_client(config)?;
    let api_key = config.api_key().unwrap_or_default().to_owned();

    Ok(OpenWeatherProvider::with_client(
        http,
        api_key,
        config.base_url.clone(),
        config.lang.clone(),
    ))
}
