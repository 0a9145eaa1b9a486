use crate::{Config, FetchError, WeatherResponse, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Remote source of current weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up by city name. Callers pass a non-blank name.
    async fn fetch_by_city(&self, city_name: &str) -> Result<WeatherResponse, FetchError>;

    /// Look up by coordinates; values are forwarded unvalidated.
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherResponse, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    provider_with_key(config.resolved_api_key(), config)
}

fn provider_with_key(
    api_key: Option<String>,
    config: &Config,
) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `weather configure` and enter your OpenWeather API key."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key, &config.base_url, config.timeout())?;
    Ok(Arc::new(provider))
}
