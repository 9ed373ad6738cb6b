use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
    model::Coordinates,
    route::LocationQuery,
};

const GEOIP_ENDPOINT: &str = "https://freegeoip.app/json/";
const GEOCODING_ENDPOINT: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Strategy for turning a run's location request into coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self) -> Result<Coordinates>;
}

/// Pick the resolver a routed request needs.
pub fn resolver_for(query: &LocationQuery, config: &Config) -> Box<dyn LocationResolver> {
    match query {
        LocationQuery::CurrentIp => Box::new(IpResolver::new()),
        LocationQuery::City(name) => {
            Box::new(CityResolver::new(name.clone(), config.api_key.clone()))
        }
    }
}

/// Geolocates the machine's public IP address.
#[derive(Debug, Clone)]
pub struct IpResolver {
    http: Client,
    endpoint: String,
}

impl IpResolver {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoint: GEOIP_ENDPOINT.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for IpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl LocationResolver for IpResolver {
    async fn resolve(&self) -> Result<Coordinates> {
        debug!("geolocating the public IP address");

        let res = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(Error::LocationUnreachable)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::LocationUnreachable)?;
        if !status.is_success() {
            return Err(Error::upstream("geolocation", status, &body));
        }

        let parsed: GeoIpResponse = serde_json::from_str(&body).map_err(|source| {
            Error::MalformedResponse {
                service: "geolocation",
                source,
            }
        })?;

        Ok(Coordinates {
            latitude: parsed.latitude,
            longitude: parsed.longitude,
        })
    }
}

/// Geocodes a city name through the OpenWeatherMap Geocoding API.
#[derive(Debug, Clone)]
pub struct CityResolver {
    city: String,
    api_key: String,
    http: Client,
    endpoint: String,
}

impl CityResolver {
    pub fn new(city: String, api_key: String) -> Self {
        Self {
            city,
            api_key,
            http: Client::new(),
            endpoint: GEOCODING_ENDPOINT.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(city: String, api_key: String, endpoint: impl Into<String>) -> Self {
        Self {
            city,
            api_key,
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

/// One geocoding hit. The endpoint also returns names and country codes,
/// only the coordinates matter here.
#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    lat: f64,
    lon: f64,
}

#[async_trait]
impl LocationResolver for CityResolver {
    async fn resolve(&self) -> Result<Coordinates> {
        debug!(city = %self.city, "geocoding city name");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", self.city.as_str()),
                ("limit", "1"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(Error::LocationUnreachable)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::LocationUnreachable)?;
        if !status.is_success() {
            return Err(Error::upstream("geocoding", status, &body));
        }

        let matches: Vec<GeocodeMatch> = serde_json::from_str(&body).map_err(|source| {
            Error::MalformedResponse {
                service: "geocoding",
                source,
            }
        })?;

        match matches.first() {
            Some(hit) => Ok(Coordinates {
                latitude: hit.lat,
                longitude: hit.lon,
            }),
            None => Err(Error::PlaceNotFound(self.city.clone())),
        }
    }
}
