//! One-shot backend availability probe.

use std::time::Duration;

use reqwest::Client;
use shared::{domain::HealthStatus, protocol::HealthReport};
use tracing::{info, warn};

pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq)]
pub struct HealthReading {
    pub status: HealthStatus,
    /// Service version from the health body, when it reports one.
    pub version: Option<String>,
}

impl HealthReading {
    fn offline() -> Self {
        Self {
            status: HealthStatus::Offline,
            version: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthProbe {
    http: Client,
    url: String,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            timeout: HEALTH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn check(&self) -> HealthStatus {
        self.check_report().await.status
    }

    /// Issues a single bounded GET. Any 2xx is `Online`; transport failures,
    /// timeouts and other statuses are `Offline`. Never retries.
    pub async fn check_report(&self) -> HealthReading {
        let response = match self.http.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %self.url, "backend health check failed: {err}");
                return HealthReading::offline();
            }
        };

        let code = response.status();
        if !code.is_success() {
            warn!(url = %self.url, status = code.as_u16(), "backend health check rejected");
            return HealthReading::offline();
        }

        let version = response
            .json::<HealthReport>()
            .await
            .ok()
            .and_then(|report| report.version);
        info!(url = %self.url, version = ?version, "backend online");
        HealthReading {
            status: HealthStatus::Online,
            version,
        }
    }
}
