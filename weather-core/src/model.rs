use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The forecast list carries 3-hour slots, so every day has exactly one
/// entry at this hour. It doubles as the day's representative in week view.
const MIDDAY_HOUR: u32 = 12;

/// The time window a run reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastRange {
    Now,
    Today,
    Tomorrow,
    Week,
}

impl ForecastRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastRange::Now => "now",
            ForecastRange::Today => "today",
            ForecastRange::Tomorrow => "tomorrow",
            ForecastRange::Week => "week",
        }
    }

    pub const fn all() -> &'static [ForecastRange] {
        &[
            ForecastRange::Now,
            ForecastRange::Today,
            ForecastRange::Tomorrow,
            ForecastRange::Week,
        ]
    }

    /// How a range is presented: one reading, or a table of them.
    pub fn display_mode(&self) -> DisplayMode {
        match self {
            ForecastRange::Now => DisplayMode::Single,
            ForecastRange::Today | ForecastRange::Tomorrow => {
                DisplayMode::Multi(Granularity::Hourly)
            }
            ForecastRange::Week => DisplayMode::Multi(Granularity::Daily),
        }
    }
}

impl fmt::Display for ForecastRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ForecastRange {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "now" => Ok(ForecastRange::Now),
            "today" => Ok(ForecastRange::Today),
            "tomorrow" => Ok(ForecastRange::Tomorrow),
            "week" => Ok(ForecastRange::Week),
            _ => Err(Error::InvalidForecast(value.to_string())),
        }
    }
}

/// Column resolution of a forecast table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One column per 3-hour slot.
    Hourly,
    /// One column per day.
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Single,
    Multi(Granularity),
}

/// A point on the globe, as returned by geolocation or geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One observed or predicted set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// Current conditions for a place, with the day's expected extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub place_name: String,
    pub reading: WeatherSnapshot,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
}

/// A chronologically ordered 5-day forecast for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub place_name: String,
    pub readings: Vec<WeatherSnapshot>,
}

impl ForecastSeries {
    /// Slice the series down to the readings a range reports on.
    ///
    /// `today` is the UTC date the run started on. Today and tomorrow keep
    /// the matching calendar day; week keeps the midday slot of each day.
    /// An empty result is not an error, the presenter words it.
    pub fn window_for(&self, range: ForecastRange, today: NaiveDate) -> ForecastSeries {
        let readings = match range {
            ForecastRange::Now => self.readings.clone(),
            ForecastRange::Today => self.on_date(today),
            ForecastRange::Tomorrow => self.on_date(today + Duration::days(1)),
            ForecastRange::Week => self
                .readings
                .iter()
                .filter(|reading| reading.timestamp.hour() == MIDDAY_HOUR)
                .cloned()
                .collect(),
        };

        ForecastSeries {
            place_name: self.place_name.clone(),
            readings,
        }
    }

    fn on_date(&self, date: NaiveDate) -> Vec<WeatherSnapshot> {
        self.readings
            .iter()
            .filter(|reading| reading.timestamp.date_naive() == date)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn snapshot(day: u32, hour: u32) -> WeatherSnapshot {
        WeatherSnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
            description: "clear sky".to_string(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            humidity_pct: 40,
            wind_speed_mps: 3.6,
        }
    }

    fn series() -> ForecastSeries {
        ForecastSeries {
            place_name: "Paris".to_string(),
            readings: vec![
                snapshot(1, 9),
                snapshot(1, 12),
                snapshot(2, 9),
                snapshot(2, 12),
                snapshot(3, 12),
            ],
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn forecast_range_as_str_roundtrip() {
        for range in ForecastRange::all() {
            let parsed: ForecastRange = range.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*range, parsed);
        }
    }

    #[test]
    fn forecast_range_parse_is_case_insensitive() {
        let parsed: ForecastRange = "Week".parse().expect("mixed case should parse");
        assert_eq!(parsed, ForecastRange::Week);
    }

    #[test]
    fn unknown_forecast_range_is_rejected() {
        let err = "yesterday".parse::<ForecastRange>().unwrap_err();
        assert!(err.to_string().contains("Invalid value 'yesterday'"));
        assert!(err.to_string().contains("now, today, tomorrow, week"));
    }

    #[test]
    fn display_modes_follow_the_range() {
        assert_eq!(ForecastRange::Now.display_mode(), DisplayMode::Single);
        assert_eq!(
            ForecastRange::Today.display_mode(),
            DisplayMode::Multi(Granularity::Hourly)
        );
        assert_eq!(
            ForecastRange::Tomorrow.display_mode(),
            DisplayMode::Multi(Granularity::Hourly)
        );
        assert_eq!(
            ForecastRange::Week.display_mode(),
            DisplayMode::Multi(Granularity::Daily)
        );
    }

    #[test]
    fn today_window_keeps_only_the_current_date() {
        let windowed = series().window_for(ForecastRange::Today, date(1));
        assert_eq!(windowed.readings.len(), 2);
        assert!(
            windowed
                .readings
                .iter()
                .all(|reading| reading.timestamp.date_naive() == date(1))
        );
    }

    #[test]
    fn tomorrow_window_keeps_only_the_next_date() {
        let windowed = series().window_for(ForecastRange::Tomorrow, date(1));
        assert_eq!(windowed.readings.len(), 2);
        assert!(
            windowed
                .readings
                .iter()
                .all(|reading| reading.timestamp.date_naive() == date(2))
        );
    }

    #[test]
    fn week_window_keeps_one_midday_slot_per_day() {
        let windowed = series().window_for(ForecastRange::Week, date(1));
        assert_eq!(windowed.readings.len(), 3);
        assert!(
            windowed
                .readings
                .iter()
                .all(|reading| reading.timestamp.hour() == 12)
        );
    }

    #[test]
    fn window_preserves_order_and_place() {
        let windowed = series().window_for(ForecastRange::Week, date(1));
        assert_eq!(windowed.place_name, "Paris");
        let days: Vec<u32> = windowed
            .readings
            .iter()
            .map(|reading| reading.timestamp.day())
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn empty_window_is_not_an_error() {
        let windowed = series().window_for(ForecastRange::Tomorrow, date(31));
        assert!(windowed.readings.is_empty());
        assert_eq!(windowed.place_name, "Paris");
    }

    #[test]
    fn now_window_is_a_passthrough() {
        let windowed = series().window_for(ForecastRange::Now, date(1));
        assert_eq!(windowed.readings.len(), 5);
    }
}
