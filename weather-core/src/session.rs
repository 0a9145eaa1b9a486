//! Latest-state slot shared with the presentation layer.
//!
//! Every fetch started through a session writes each of its states into one
//! `watch` slot. Whichever state arrives last wins; an earlier fetch that
//! finishes late overwrites a newer result.

use futures::StreamExt;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    repository::{FetchStream, WeatherRepository},
    state::FetchState,
};

#[derive(Debug)]
pub struct WeatherSession {
    repository: WeatherRepository,
    latest: Arc<watch::Sender<FetchState>>,
}

impl WeatherSession {
    pub fn new(repository: WeatherRepository) -> Self {
        let (latest, _) = watch::channel(FetchState::Loading);
        Self { repository, latest: Arc::new(latest) }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.latest.subscribe()
    }

    pub fn current(&self) -> FetchState {
        self.latest.borrow().clone()
    }

    /// Search by city name. Blank input is ignored and returns `None`.
    pub fn search(&self, query: &str) -> Option<JoinHandle<()>> {
        let city = query.trim();
        if city.is_empty() {
            return None;
        }
        Some(self.forward(self.repository.fetch_by_city(city)))
    }

    pub fn locate(&self, latitude: f64, longitude: f64) -> JoinHandle<()> {
        self.forward(self.repository.fetch_by_coordinates(latitude, longitude))
    }

    /// Start-up: search the remembered city, if there is one.
    pub async fn restore(&self) -> Option<(String, JoinHandle<()>)> {
        let city = self.repository.last_city().await?;
        let handle = self.search(&city)?;
        Some((city.trim().to_string(), handle))
    }

    fn forward(&self, mut states: FetchStream) -> JoinHandle<()> {
        let latest = Arc::clone(&self.latest);
        tokio::spawn(async move {
            while let Some(state) = states.next().await {
                latest.send_replace(state);
            }
        })
    }
}
