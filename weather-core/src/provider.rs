use crate::{
    Config,
    error::Result,
    model::{Coordinates, CurrentWeather, ForecastSeries},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A weather data source able to serve both lookup modes of a run.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One current-conditions reading for the given coordinates.
    async fn current(&self, coords: &Coordinates) -> Result<CurrentWeather>;

    /// The 5-day forecast series for the given coordinates.
    async fn forecast(&self, coords: &Coordinates) -> Result<ForecastSeries>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(config.api_key.clone()))
}
