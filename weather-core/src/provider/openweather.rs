use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    model::{Coordinates, CurrentWeather, ForecastSeries, WeatherSnapshot},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, path: &str, coords: &Coordinates) -> Result<String> {
        let url = format!("{}/{path}", self.base_url);
        debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            path,
            "requesting OpenWeather data"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(Error::WeatherUnreachable)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::WeatherUnreachable)?;

        if !status.is_success() {
            return Err(Error::upstream("weather", status, &body));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coords: &Coordinates) -> Result<CurrentWeather> {
        let body = self.fetch("weather", coords).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|source| {
            Error::MalformedResponse {
                service: "weather",
                source,
            }
        })?;

        Ok(CurrentWeather {
            place_name: parsed.name,
            temp_min_c: parsed.main.temp_min,
            temp_max_c: parsed.main.temp_max,
            reading: WeatherSnapshot {
                timestamp: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
                description: first_description(&parsed.weather),
                temperature_c: parsed.main.temp,
                feels_like_c: parsed.main.feels_like,
                humidity_pct: parsed.main.humidity,
                wind_speed_mps: parsed.wind.speed,
            },
        })
    }

    async fn forecast(&self, coords: &Coordinates) -> Result<ForecastSeries> {
        let body = self.fetch("forecast", coords).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|source| {
            Error::MalformedResponse {
                service: "weather",
                source,
            }
        })?;

        let readings = parsed
            .list
            .into_iter()
            .map(|entry| WeatherSnapshot {
                timestamp: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                description: first_description(&entry.weather),
                temperature_c: entry.main.temp,
                feels_like_c: entry.main.feels_like,
                humidity_pct: entry.main.humidity,
                wind_speed_mps: entry.wind.speed,
            })
            .collect();

        Ok(ForecastSeries {
            place_name: parsed.city.name,
            readings,
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn first_description(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}
