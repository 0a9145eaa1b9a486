//! Durable storage for the last successfully searched city.

use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    path::PathBuf,
    sync::Mutex,
};

use crate::{config::project_dirs, error::StoreError};

pub const PREFERENCES_FILE: &str = "weather_prefs.toml";
pub const KEY_LAST_CITY: &str = "key_last_city";

#[async_trait]
pub trait LastCityStore: Send + Sync + Debug {
    async fn get(&self) -> Result<Option<String>, StoreError>;

    async fn set(&self, city: &str) -> Result<(), StoreError>;
}

/// Key/value TOML file in the platform data directory.
#[derive(Debug, Clone)]
pub struct FileCityStore {
    path: PathBuf,
}

impl FileCityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located next to the application's other private data.
    pub fn in_data_dir() -> anyhow::Result<Self> {
        Ok(Self::new(project_dirs()?.data_dir().join(PREFERENCES_FILE)))
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl LastCityStore for FileCityStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(KEY_LAST_CITY))
    }

    async fn set(&self, city: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries().await?;
        entries.insert(KEY_LAST_CITY.to_string(), city.to_string());

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Replace by rename so an interrupted write leaves the old file intact.
        let contents = toml::to_string(&entries)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, contents).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(path = %self.path.display(), city, "Stored last city");
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCityStore {
    value: Mutex<Option<String>>,
}

impl MemoryCityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(city: impl Into<String>) -> Self {
        Self { value: Mutex::new(Some(city.into())) }
    }
}

#[async_trait]
impl LastCityStore for MemoryCityStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn set(&self, city: &str) -> Result<(), StoreError> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(city.to_string());
        Ok(())
    }
}
