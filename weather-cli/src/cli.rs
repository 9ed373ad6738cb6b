use chrono::Utc;
use clap::Parser;

use weather_core::{Config, ForecastRange, Report, provider_from_config, resolver_for, route};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Command line tool to get the weather forecast")]
pub struct Cli {
    /// City to get the weather forecast for. Use 'here' for your current
    /// location, and quotes for names with spaces ("New York").
    #[arg(value_name = "LOCATION", default_value = "here")]
    pub location: String,

    /// Forecast range. Options are: now, today, tomorrow, week.
    #[arg(value_name = "FORECAST", default_value = "now")]
    pub forecast: String,

    /// Disable colour output.
    #[arg(long = "no-colour")]
    pub no_colour: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if self.no_colour {
            colored::control::set_override(false);
        }

        // Both positional words are case-insensitive.
        let location = self.location.to_lowercase();
        let range: ForecastRange = self.forecast.to_lowercase().parse()?;
        let routed = route::plan(&location, range);

        let config = Config::from_env()?;
        let resolver = resolver_for(&routed.query, &config);
        let provider = provider_from_config(&config);

        let today = Utc::now().date_naive();
        let report = route::execute(&routed, resolver.as_ref(), provider.as_ref(), today).await?;

        match report {
            Report::Current(current) => println!("{}", render::current(&current)),
            Report::Forecast {
                series,
                granularity,
            } => println!("{}", render::forecast(&series, granularity)),
        }

        Ok(())
    }
}
