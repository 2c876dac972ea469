//! Connectivity Gate: one name-resolution probe before any fetch.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use wikisync_shared::{Result, WikiSyncError};

/// Port paired with the host for the resolver call; nothing connects to it.
const PROBE_PORT: u16 = 80;

/// Checks whether the remote host is reachable.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// `Ok` if `host` resolves, [`WikiSyncError::Connectivity`] otherwise.
    async fn probe(&self, host: &str) -> Result<()>;
}

/// DNS lookup with a bounded timeout.
#[derive(Debug, Clone)]
pub struct DnsProbe {
    timeout: Duration,
}

impl DnsProbe {
    /// Create a probe that gives up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ConnectivityProbe for DnsProbe {
    async fn probe(&self, host: &str) -> Result<()> {
        let unreachable = || WikiSyncError::Connectivity {
            host: host.to_string(),
        };

        match tokio::time::timeout(self.timeout, tokio::net::lookup_host((host, PROBE_PORT))).await
        {
            Ok(Ok(mut addrs)) => match addrs.next() {
                Some(addr) => {
                    debug!(host, %addr, "host resolved");
                    Ok(())
                }
                None => Err(unreachable()),
            },
            Ok(Err(e)) => {
                debug!(host, error = %e, "lookup failed");
                Err(unreachable())
            }
            Err(_) => {
                debug!(host, timeout_ms = self.timeout.as_millis(), "lookup timed out");
                Err(unreachable())
            }
        }
    }
}

/// Run the gate. Any probe failure is reported as a connectivity error.
#[instrument(skip(probe))]
pub async fn check_connectivity(probe: &dyn ConnectivityProbe, host: &str) -> Result<()> {
    match probe.probe(host).await {
        Ok(()) => {
            info!("remote host reachable");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "remote host unreachable, aborting");
            Err(WikiSyncError::Connectivity {
                host: host.to_string(),
            })
        }
    }
}
