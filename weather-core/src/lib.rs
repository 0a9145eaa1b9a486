//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - The fetch state machine (`Loading` then `Success` or `Failure`)
//! - Durable storage of the last searched city
//! - A latest-state slot for whatever renders the results
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod repository;
pub mod session;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{FetchError, StoreError};
pub use model::{WeatherQuery, WeatherResponse, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use repository::{FetchStream, WeatherRepository};
pub use session::WeatherSession;
pub use state::FetchState;
pub use store::{FileCityStore, LastCityStore, MemoryCityStore};
