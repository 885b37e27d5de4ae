//! Directory of valid municipality names, served to clients as advisory data.
//!
//! Bookings never consult it; a failing directory only affects its own listing.

use std::time::Duration;

use async_trait::async_trait;
use common::{municipalities::fetch_municipalities, CoreError};
use configs::MunicipalitiesConfig;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("municipality directory unavailable: {0}")]
    Unavailable(#[from] CoreError),
    #[error("http client error: {0}")]
    Client(String),
}

#[async_trait]
pub trait MunicipalityDirectory: Send + Sync {
    async fn municipalities(&self) -> Result<Vec<String>, DirectoryError>;
}

/// Directory backed by the public geoapi.pt municipality list.
pub struct GeoApiDirectory {
    client: reqwest::Client,
    url: String,
}

impl GeoApiDirectory {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Client(e.to_string()))?;
        Ok(Self { client, url: url.into() })
    }

    pub fn from_config(cfg: &MunicipalitiesConfig) -> Result<Self, DirectoryError> {
        Self::new(cfg.url.clone(), Duration::from_secs(cfg.timeout_secs))
    }
}

#[async_trait]
impl MunicipalityDirectory for GeoApiDirectory {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn municipalities(&self) -> Result<Vec<String>, DirectoryError> {
        match fetch_municipalities(&self.client, &self.url).await {
            Ok(names) => {
                info!(count = names.len(), "municipalities fetched");
                Ok(names)
            }
            Err(e) => {
                error!(error = %e, "municipality directory request failed");
                Err(e.into())
            }
        }
    }
}

/// Fixed list, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: Vec<String>,
}

impl StaticDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { names: names.into_iter().map(Into::into).collect() }
    }
}

#[async_trait]
impl MunicipalityDirectory for StaticDirectory {
    async fn municipalities(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.names.clone())
    }
}
