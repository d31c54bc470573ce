// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Single GET against the manage-deposit /report endpoint and outcome classification
// role: http/fetch
// inputs: report URL; Accept header value
// outputs: ReportResult on HTTP 200
// side_effects: One network request per call; no retry
// invariants:
// - the body is read completely before the status is classified
// - only 200 is success; every other status is RemoteReport{status}
// errors: Transport for connect/read failures; RemoteReport for non-200
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::model::ReportResult;

/// Raw response: status code and the fully buffered body bytes.
pub struct RawResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

// --- Trait seam for the report service ---
pub trait ReportClient {
  fn get(&self, url: &str, accept: &str) -> Result<RawResponse>;
}

pub struct HttpReportClient {
  agent: ureq::Agent,
}

impl HttpReportClient {
  pub fn new() -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder()
      .http_status_as_error(false)
      .build()
      .into();
    Self { agent }
  }
}

impl Default for HttpReportClient {
  fn default() -> Self {
    Self::new()
  }
}

impl ReportClient for HttpReportClient {
  fn get(&self, url: &str, accept: &str) -> Result<RawResponse> {
    let mut resp = self
      .agent
      .get(url)
      .header("Accept", accept)
      .header("User-Agent", concat!("dd-dv-cli/", env!("CARGO_PKG_VERSION")))
      .call()
      .map_err(|e| ReportError::Transport(e.to_string()))?;

    let status = resp.status().as_u16();
    let body = resp
      .body_mut()
      .with_config()
      .limit(u64::MAX)
      .read_to_vec()
      .map_err(|e| ReportError::Transport(e.to_string()))?;

    Ok(RawResponse { status, body })
  }
}

pub fn fetch_report(client: &dyn ReportClient, url: &str, accept: &str) -> Result<ReportResult> {
  debug!(url, accept, "requesting report");
  let raw = client.get(url, accept)?;
  debug!(status = raw.status, bytes = raw.body.len(), "report response");

  if raw.status == 200 {
    Ok(ReportResult::new(raw.status, raw.body))
  } else {
    Err(ReportError::RemoteReport { status: raw.status })
  }
}
