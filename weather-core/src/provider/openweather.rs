use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use crate::{error::FetchError, model::WeatherResponse};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<WeatherResponse, FetchError> {
        let res = request.send().await.map_err(network_error)?;

        let status = res.status();
        tracing::debug!(%status, url = %res.url(), "OpenWeather responded");

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(FetchError::Http { status: status.as_u16(), body });
        }

        let body = res.text().await.map_err(network_error)?;
        parse_body(&body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_by_city(&self, city_name: &str) -> Result<WeatherResponse, FetchError> {
        tracing::debug!(city = city_name, "Requesting current weather by city");

        let request = self.http.get(self.weather_url()).query(&[
            ("q", city_name),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);

        self.execute(request).await
    }

    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherResponse, FetchError> {
        tracing::debug!(latitude, longitude, "Requesting current weather by coordinates");

        // No `units` here: this endpoint has always been called without it.
        let request = self
            .http
            .get(self.weather_url())
            .query(&[("lat", latitude), ("lon", longitude)])
            .query(&[("appid", self.api_key.as_str())]);

        self.execute(request).await
    }
}

fn parse_body(body: &str) -> Result<WeatherResponse, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(FetchError::EmptyPayload);
    }

    serde_json::from_str(trimmed).map_err(|e| {
        tracing::debug!(body = %truncate_body(body), "Unparseable OpenWeather body");
        FetchError::Decode(format!("Failed to parse OpenWeather JSON: {e}"))
    })
}

fn network_error(err: reqwest::Error) -> FetchError {
    // `{:#}` includes the source chain, e.g. "... : operation timed out".
    FetchError::Network(format!("{:#}", anyhow::Error::new(err)))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
