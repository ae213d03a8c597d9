//! Best-effort IDE refresh notification

use std::time::Duration;

use reqwest::Url;

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8386;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Asks a running IDE to refresh a project over HTTP
#[derive(Debug, Clone)]
pub struct RefreshClient {
    host: String,
    port: u16,
    timeout: Duration,
}

impl RefreshClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `http://<host>:<port>/refresh?<project>=INFINITE`
    pub fn url(&self, project: &str) -> Result<Url> {
        let base = format!("http://{}:{}/refresh", self.host, self.port);
        let mut url = Url::parse(&base).map_err(|e| Error::Refresh {
            message: format!("{}: {}", base, e),
        })?;
        url.query_pairs_mut().append_pair(project, "INFINITE");
        Ok(url)
    }

    /// Send the request. Callers usually log a failure and carry on.
    pub fn refresh(&self, project: &str) -> Result<()> {
        let url = self.url(project)?;
        tracing::info!(project, "Refreshing project");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Refresh {
                message: e.to_string(),
            })?;

        client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Refresh {
                message: format!("{}: {}", url, e),
            })?;
        Ok(())
    }
}

impl Default for RefreshClient {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
