//! Application state management

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bookfair_core::{MockRouter, User};
use bookfair_net::{ApiClient, HttpTransport, MockFetch, Transport};
use tracing::debug;

use crate::config::{project_dirs, Config};
use crate::session::SessionStore;

const SESSION_FILE: &str = "session.json";

/// Main application state
pub struct AppState<I = HttpTransport> {
    pub config: Config,
    pub client: ApiClient<MockFetch<I>>,
    pub sessions: SessionStore,
    pub current_user: Option<User>,
}

impl AppState<HttpTransport> {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = Self::data_path()?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let upstream = HttpTransport::new(&config.origin)
            .with_context(|| format!("Invalid origin {}", config.origin))?;

        Ok(Self::with_transport(config, upstream, data_dir))
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = project_dirs().context("Could not determine data directory")?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

impl<I: Transport> AppState<I> {
    /// Build state around an arbitrary upstream transport
    pub fn with_transport(config: Config, upstream: I, data_dir: impl Into<PathBuf>) -> Self {
        let sessions = SessionStore::new(data_dir.into().join(SESSION_FILE));
        debug!(path = %sessions.path().display(), "Session storage");

        let fetch = MockFetch::new(MockRouter::seeded(), upstream)
            .with_prefix(config.mock.prefix.clone())
            .with_latency(Duration::from_millis(config.mock.latency_ms));
        let client = ApiClient::new(
            Arc::new(fetch),
            config.api_base_url.clone(),
            config.resource_base(),
        );

        Self {
            config,
            client,
            sessions,
            current_user: None,
        }
    }

    pub fn fetch(&self) -> &Arc<MockFetch<I>> {
        self.client.transport()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.client.token().is_some()
    }
}
