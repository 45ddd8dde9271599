use scout_http::{HttpClient, RequestOpts};
use std::time::Duration;

/// Finds the first candidate data endpoint that answers with HTTP 200.
pub struct EndpointProber<'a> {
    http: &'a HttpClient,
    candidates: &'a [String],
    timeout: Duration,
}

impl<'a> EndpointProber<'a> {
    pub fn new(http: &'a HttpClient, candidates: &'a [String], timeout: Duration) -> Self {
        Self {
            http,
            candidates,
            timeout,
        }
    }

    /// GET each candidate once, in order. Network failures and non-200
    /// answers move on to the next candidate.
    pub async fn probe(&self) -> Option<String> {
        tracing::info!(target: "harvest.probe", candidates = self.candidates.len(), "probe.start");

        for endpoint in self.candidates {
            match self.http.get(endpoint, RequestOpts::timeout(self.timeout)).await {
                Ok(resp) if resp.status.as_u16() == 200 => {
                    tracing::info!(target: "harvest.probe", %endpoint, "probe.endpoint.ok");
                    return Some(endpoint.clone());
                }
                Ok(resp) => {
                    tracing::debug!(target: "harvest.probe", %endpoint, status = %resp.status, "probe.endpoint.rejected");
                }
                Err(e) => {
                    tracing::debug!(target: "harvest.probe", %endpoint, error = %e, "probe.endpoint.unreachable");
                }
            }
        }

        tracing::warn!(target: "harvest.probe", "no data endpoint answered; falling back to the rendered listing");
        None
    }
}
