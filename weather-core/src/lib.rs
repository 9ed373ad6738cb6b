//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration read from the environment
//! - Routing from CLI words to a lookup plan
//! - Location resolution (IP geolocation and city geocoding)
//! - The OpenWeatherMap client
//! - Shared domain models (coordinates, snapshots, forecast series)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod route;

pub use config::Config;
pub use error::{Error, Result};
pub use location::{CityResolver, IpResolver, LocationResolver, resolver_for};
pub use model::{
    Coordinates, CurrentWeather, DisplayMode, ForecastRange, ForecastSeries, Granularity,
    WeatherSnapshot,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use route::{LocationQuery, Report, RequestPlan};
