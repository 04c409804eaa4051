//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and snapshot normalization
//! - Device location sources
//! - The lookup service and the caller-side display state
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;

pub use config::{Config, LocationConfig};
pub use error::LookupError;
pub use location::{ConsentLocator, DeviceLocator, IpLocator, NoLocator, PermissionPrompt};
pub use model::{Condition, Coordinates, LookupQuery, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use service::{WeatherLookupService, is_demo_name};
pub use state::{DisplayState, LookupState, RequestTicket};
