use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Condition, LookupQuery, WeatherSnapshot},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/data/2.5/weather";
const MPS_TO_KPH: f64 = 3.6;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, lang: String) -> Self {
        Self::with_client(Client::new(), api_key, base_url, lang)
    }

    pub fn with_client(http: Client, api_key: String, base_url: String, lang: String) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CURRENT_PATH);
        Self {
            api_key,
            endpoint,
            lang,
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn query_params(&self, query: &LookupQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            LookupQuery::ByName(name) => vec![("q", name.clone())],
            LookupQuery::ByCoordinates(coords) => vec![
                ("lat", coords.latitude().to_string()),
                ("lon", coords.longitude().to_string()),
            ],
        };
        params.push(("units", "metric".to_string()));
        params.push(("lang", self.lang.clone()));
        params.push(("appid", self.api_key.clone()));
        params
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for WeatherSnapshot {
    type Error = LookupError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let primary = parsed
            .weather
            .first()
            .ok_or_else(|| LookupError::network("OpenWeather response has no weather entry"))?;

        if parsed.main.humidity > 100 {
            return Err(LookupError::network(format!(
                "OpenWeather reported humidity {}%",
                parsed.main.humidity
            )));
        }

        Ok(WeatherSnapshot::new(
            parsed.name,
            round_half_up(parsed.main.temp) as i32,
            Condition::from_provider(&primary.main),
            parsed.main.humidity,
            mps_to_kph(parsed.wind.speed),
        ))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LookupQuery) -> Result<WeatherSnapshot, LookupError> {
        tracing::debug!(endpoint = %self.endpoint, ?query, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%status, "OpenWeather request failed");
            return Err(LookupError::NotFound);
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(error = %err, body = %truncate_body(&body), "undecodable OpenWeather payload");
            LookupError::network(format!("Failed to parse OpenWeather JSON: {err}"))
        })?;

        let snapshot = WeatherSnapshot::try_from(parsed)?;
        tracing::debug!(place = snapshot.place(), "received current weather");
        Ok(snapshot)
    }
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn mps_to_kph(speed: f64) -> u32 {
    round_half_up(speed * MPS_TO_KPH).max(0.0) as u32
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
