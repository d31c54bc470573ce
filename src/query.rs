// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Serialize report filters into the /report query string and target URL
// role: http/query
// inputs: ReportRequest (already resolved; age_days ignored)
// outputs: Percent-encoded query string; absolute report URL
// invariants:
// - user pairs precede state pairs, each in list order; then startdate, enddate
// - blank scalar filters are omitted; empty query means no '?'
// - every value is percent-encoded on its own (spaces as %20)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::ReportRequest;

pub const REPORT_PATH: &str = "/report";

pub fn build_query(req: &ReportRequest) -> String {
  let mut pairs: Vec<String> = Vec::new();

  for u in &req.users {
    pairs.push(pair("user", u));
  }
  for s in &req.states {
    pairs.push(pair("state", s));
  }
  if let Some(start) = non_blank(req.start_date.as_deref()) {
    pairs.push(pair("startdate", start));
  }
  if let Some(end) = non_blank(req.end_date.as_deref()) {
    pairs.push(pair("enddate", end));
  }

  pairs.join("&")
}

pub fn report_url(req: &ReportRequest) -> String {
  let base = normalize_base_url(&req.service_base_url);
  let query = build_query(req);
  if query.is_empty() {
    format!("{}{}", base, REPORT_PATH)
  } else {
    format!("{}{}?{}", base, REPORT_PATH, query)
  }
}

/// Strip a single trailing slash, e.g. `http://host:20355/` -> `http://host:20355`.
pub fn normalize_base_url(base: &str) -> &str {
  base.strip_suffix('/').unwrap_or(base)
}

fn pair(key: &str, value: &str) -> String {
  format!("{}={}", key, urlencoding::encode(value))
}

fn non_blank(v: Option<&str>) -> Option<&str> {
  v.filter(|s| !s.trim().is_empty())
}
