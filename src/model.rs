// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Transient values flowing through the deposits report pipeline
// role: model/types
// outputs: ReportRequest, ReportResult, DeliveryRequest
// invariants:
// - ReportRequest.age_days is None once the request has been resolved
// - ReportResult.is_multi_line is derived from the body at construction
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportRequest {
  pub service_base_url: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub age_days: Option<u32>,
  pub states: Vec<String>,
  pub users: Vec<String>,
  pub accept_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResult {
  pub status: u16,
  /// Raw bytes as served; the encoding is the service's business.
  pub body: Vec<u8>,
  pub is_multi_line: bool,
}

impl ReportResult {
  pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
    let body = body.into();
    let is_multi_line = line_count(&body) > 1;
    Self { status, body, is_multi_line }
  }
}

/// Number of `\n`-separated segments, ignoring trailing empty ones.
///
/// `"a\n"` is one line, `"a\nb"` two, `""` and `"\n\n"` count as at most one.
pub fn line_count(body: &[u8]) -> usize {
  let mut segments: Vec<&[u8]> = body.split(|b| *b == b'\n').collect();
  while segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
    segments.pop();
  }
  segments.len()
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
  pub attachment_path: String,
  pub subject: String,
  pub body_text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from_address: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub to_addresses: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cc_addresses: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bcc_addresses: Option<String>,
}
