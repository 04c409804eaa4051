//! Single-shot device location.
//!
//! A [`DeviceLocator`] resolves the current position once; there is no
//! continuous tracking. [`ConsentLocator`] gates any locator behind a user
//! prompt so a refusal surfaces as [`LookupError::PermissionDenied`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{Config, LookupError, model::Coordinates};

#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LookupError>;
}

#[async_trait]
impl<L: DeviceLocator + ?Sized> DeviceLocator for Box<L> {
    async fn current_position(&self) -> Result<Coordinates, LookupError> {
        (**self).current_position().await
    }
}

/// Asks the user whether their location may be used.
pub trait PermissionPrompt: Send + Sync + Debug {
    fn allow_location(&self) -> bool;
}

/// Platform without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

#[async_trait]
impl DeviceLocator for NoLocator {
    async fn current_position(&self) -> Result<Coordinates, LookupError> {
        Err(LookupError::Unsupported)
    }
}

/// Approximate position from the public IP address.
///
/// Speaks the `ip-api.com` JSON format.
#[derive(Debug, Clone)]
pub struct IpLocator {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }
}

#[async_trait]
impl DeviceLocator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, LookupError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting IP location");

        let res = self.http.get(&self.endpoint).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(LookupError::network(format!(
                "location service answered with status {status}"
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|err| LookupError::network(format!("Failed to parse location JSON: {err}")))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or(body.status);
            return Err(LookupError::network(format!("location lookup failed: {reason}")));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Coordinates::new(lat, lon)
                .map_err(|_| LookupError::network("location service returned invalid coordinates")),
            _ => Err(LookupError::network("location service returned no coordinates")),
        }
    }
}

/// Wraps a locator behind a permission prompt.
#[derive(Debug)]
pub struct ConsentLocator<L, P> {
    inner: L,
    prompt: P,
}

impl<L, P> ConsentLocator<L, P> {
    pub fn new(inner: L, prompt: P) -> Self {
        Self { inner, prompt }
    }
}

#[async_trait]
impl<L: DeviceLocator, P: PermissionPrompt> DeviceLocator for ConsentLocator<L, P> {
    async fn current_position(&self) -> Result<Coordinates, LookupError> {
        if !self.prompt.allow_location() {
            tracing::info!("location access declined");
            return Err(LookupError::PermissionDenied);
        }

        self.inner.current_position().await
    }
}

/// Pick the locator the config asks for.
pub fn locator_from_config(config: &Config, http: Client) -> Box<dyn DeviceLocator> {
    if config.location.enabled {
        Box::new(IpLocator::new(http, config.location.endpoint.clone()))
    } else {
        Box::new(NoLocator)
    }
}
