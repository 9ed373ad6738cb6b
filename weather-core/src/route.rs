use chrono::NaiveDate;
use tracing::debug;

use crate::{
    error::Result,
    location::LocationResolver,
    model::{CurrentWeather, DisplayMode, ForecastRange, ForecastSeries, Granularity},
    provider::WeatherProvider,
};

/// How a run obtains its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// Geolocate the machine's public IP address.
    CurrentIp,
    /// Geocode a city by name.
    City(String),
}

/// The lookup path and effective range for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub query: LocationQuery,
    pub range: ForecastRange,
}

/// Decide the lookup path and effective range for a pair of CLI words.
///
/// The LOCATION slot doubles as a range: a bare range word there ("weather
/// week") selects the current location and overrides whatever FORECAST was
/// given. Anything else that is not "here" is a city name.
pub fn plan(location: &str, range: ForecastRange) -> RequestPlan {
    if location == "here" {
        return RequestPlan {
            query: LocationQuery::CurrentIp,
            range,
        };
    }

    if let Ok(overriding) = location.parse::<ForecastRange>() {
        return RequestPlan {
            query: LocationQuery::CurrentIp,
            range: overriding,
        };
    }

    RequestPlan {
        query: LocationQuery::City(location.to_string()),
        range,
    }
}

/// What one completed run produces, ready for rendering.
#[derive(Debug, Clone)]
pub enum Report {
    Current(CurrentWeather),
    Forecast {
        series: ForecastSeries,
        granularity: Granularity,
    },
}

/// Resolve coordinates, fetch the weather, and slice the result for display.
///
/// The steps run strictly in order; a resolution failure means no weather
/// request is issued at all.
pub async fn execute(
    plan: &RequestPlan,
    resolver: &dyn LocationResolver,
    provider: &dyn WeatherProvider,
    today: NaiveDate,
) -> Result<Report> {
    let coords = resolver.resolve().await?;
    debug!(
        lat = coords.latitude,
        lon = coords.longitude,
        range = %plan.range,
        "fetching weather"
    );

    match plan.range.display_mode() {
        DisplayMode::Single => Ok(Report::Current(provider.current(&coords).await?)),
        DisplayMode::Multi(granularity) => {
            let series = provider.forecast(&coords).await?;
            Ok(Report::Forecast {
                series: series.window_for(plan.range, today),
                granularity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::location::IpResolver;
    use crate::model::{Coordinates, WeatherSnapshot};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::MockServer;

    const PARIS: Coordinates = Coordinates {
        latitude: 48.86,
        longitude: 2.35,
    };

    #[derive(Debug)]
    struct FixedResolver(Coordinates);

    #[async_trait]
    impl LocationResolver for FixedResolver {
        async fn resolve(&self) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn current(&self, _coords: &Coordinates) -> Result<CurrentWeather> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CurrentWeather {
                place_name: "Paris".to_string(),
                reading: reading(1, 12),
                temp_min_c: 15.0,
                temp_max_c: 21.0,
            })
        }

        async fn forecast(&self, _coords: &Coordinates) -> Result<ForecastSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ForecastSeries {
                place_name: "Paris".to_string(),
                readings: vec![reading(1, 9), reading(1, 12), reading(2, 12)],
            })
        }
    }

    fn reading(day: u32, hour: u32) -> WeatherSnapshot {
        WeatherSnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            description: "clear sky".to_string(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            humidity_pct: 40,
            wind_speed_mps: 3.6,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn here_uses_ip_geolocation() {
        let routed = plan("here", ForecastRange::Today);
        assert_eq!(
            routed,
            RequestPlan {
                query: LocationQuery::CurrentIp,
                range: ForecastRange::Today,
            }
        );
    }

    #[test]
    fn range_word_in_the_location_slot_overrides_the_forecast() {
        let routed = plan("week", ForecastRange::Now);
        assert_eq!(routed.query, LocationQuery::CurrentIp);
        assert_eq!(routed.range, ForecastRange::Week);
    }

    #[test]
    fn now_in_the_location_slot_overrides_an_explicit_week() {
        let routed = plan("now", ForecastRange::Week);
        assert_eq!(routed.query, LocationQuery::CurrentIp);
        assert_eq!(routed.range, ForecastRange::Now);
    }

    #[test]
    fn city_name_selects_geocoding() {
        let routed = plan("paris", ForecastRange::Tomorrow);
        assert_eq!(routed.query, LocationQuery::City("paris".to_string()));
        assert_eq!(routed.range, ForecastRange::Tomorrow);
    }

    #[tokio::test]
    async fn now_requests_current_conditions() {
        let provider = CountingProvider::default();
        let routed = plan("here", ForecastRange::Now);

        let report = execute(&routed, &FixedResolver(PARIS), &provider, today())
            .await
            .expect("run must succeed");

        assert!(matches!(report, Report::Current(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn today_yields_an_hourly_window() {
        let provider = CountingProvider::default();
        let routed = plan("here", ForecastRange::Today);

        let report = execute(&routed, &FixedResolver(PARIS), &provider, today())
            .await
            .expect("run must succeed");

        match report {
            Report::Forecast {
                series,
                granularity,
            } => {
                assert_eq!(granularity, Granularity::Hourly);
                assert_eq!(series.readings.len(), 2);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn week_yields_a_daily_window() {
        let provider = CountingProvider::default();
        let routed = plan("week", ForecastRange::Now);

        let report = execute(&routed, &FixedResolver(PARIS), &provider, today())
            .await
            .expect("run must succeed");

        match report {
            Report::Forecast {
                series,
                granularity,
            } => {
                assert_eq!(granularity, Granularity::Daily);
                assert_eq!(series.readings.len(), 2);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_geolocation_prevents_any_weather_request() {
        // An unpooled server is required: `MockServer::start()` leases from a
        // global pool whose listener stays open after drop.
        let server = MockServer::builder().start().await;
        let dead_endpoint = server.uri();
        drop(server);

        let resolver = IpResolver::with_endpoint(dead_endpoint);
        let provider = CountingProvider::default();
        let routed = plan("here", ForecastRange::Now);

        let err = execute(&routed, &resolver, &provider, today()).await.unwrap_err();

        assert!(matches!(err, Error::LocationUnreachable(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
