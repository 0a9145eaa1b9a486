//! Drives a single fetch from `Loading` to its terminal state.
//!
//! Each call spawns its own task and hands back an independent stream, so
//! concurrent fetches never share or cancel one another. Must be called from
//! inside a Tokio runtime.

use futures::Stream;
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::sync::mpsc;

use crate::{
    error::FetchError,
    model::{WeatherQuery, WeatherResponse, WeatherSnapshot},
    provider::WeatherProvider,
    state::FetchState,
    store::LastCityStore,
};

/// States of one fetch: `Loading`, then exactly one of `Success` / `Failure`.
#[derive(Debug)]
pub struct FetchStream {
    rx: mpsc::Receiver<FetchState>,
}

impl Stream for FetchStream {
    type Item = FetchState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRepository {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn LastCityStore>,
}

impl WeatherRepository {
    pub fn new(provider: Arc<dyn WeatherProvider>, store: Arc<dyn LastCityStore>) -> Self {
        Self { provider, store }
    }

    pub fn fetch(&self, query: WeatherQuery) -> FetchStream {
        match query {
            WeatherQuery::City(city) => self.fetch_by_city(city),
            WeatherQuery::Coordinates { latitude, longitude } => {
                self.fetch_by_coordinates(latitude, longitude)
            }
        }
    }

    /// Fetch by name; a successful result is remembered as the last city.
    pub fn fetch_by_city(&self, city: impl Into<String>) -> FetchStream {
        let city = city.into();
        let provider = Arc::clone(&self.provider);
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel(2);

        tokio::spawn(async move {
            let _ = tx.send(FetchState::Loading).await;

            let result = provider.fetch_by_city(&city).await;
            let succeeded = result.is_ok();
            let _ = tx.send(into_terminal_state(result)).await;

            if succeeded {
                // Sent already; a failed write only gets logged.
                match store.set(&city).await {
                    Ok(()) => tracing::debug!(city = %city, "Remembered last city"),
                    Err(e) => tracing::warn!(city = %city, error = %e, "Failed to store last city"),
                }
            }
        });

        FetchStream { rx }
    }

    /// Fetch by coordinates. Never touches the store.
    pub fn fetch_by_coordinates(&self, latitude: f64, longitude: f64) -> FetchStream {
        let provider = Arc::clone(&self.provider);
        let (tx, rx) = mpsc::channel(2);

        tokio::spawn(async move {
            let _ = tx.send(FetchState::Loading).await;

            let result = provider.fetch_by_coordinates(latitude, longitude).await;
            let _ = tx.send(into_terminal_state(result)).await;
        });

        FetchStream { rx }
    }

    /// Last stored city, if any. Store errors are logged and read as `None`.
    pub async fn last_city(&self) -> Option<String> {
        match self.store.get().await {
            Ok(city) => city,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read last city");
                None
            }
        }
    }
}

fn into_terminal_state(result: Result<WeatherResponse, FetchError>) -> FetchState {
    match result {
        Ok(raw) => {
            let snapshot = WeatherSnapshot::from(raw);
            tracing::info!(location = %snapshot.location_name, "Weather fetched");
            FetchState::Success(snapshot)
        }
        Err(e) => {
            tracing::info!(error = %e, "Weather fetch failed");
            FetchState::Failure(e.message())
        }
    }
}
