// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the deposits report end to end: URL, fetch, route, optional mail delivery
// role: processing/orchestrator
// inputs: EffectiveConfig (start date already resolved); report client; mail transport
// outputs: Final Disposition, or the first stage error
// side_effects: Network request; stdout or file write; optional mail child process
// invariants:
// - stages run strictly in order and the first error stops the run
// - the mail transport is called at most once and only after a successful write
// - a delivery failure leaves the written report in place
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use tracing::debug;

use crate::cli::EffectiveConfig;
use crate::error::Result;
use crate::fetch::{fetch_report, ReportClient};
use crate::mail::{build_delivery_request, dispatch, MailTransport};
use crate::output::{route_report, Disposition};
use crate::query::report_url;

pub fn run_report(
  cfg: &EffectiveConfig,
  client: &dyn ReportClient,
  transport: &dyn MailTransport,
  out: &mut dyn Write,
) -> Result<Disposition> {
  if let Ok(json) = serde_json::to_string(cfg) {
    debug!(config = %json, "effective configuration");
  }

  let url = report_url(&cfg.request);
  let result = fetch_report(client, &url, &cfg.request.accept_format)?;
  debug!(status = result.status, multi_line = result.is_multi_line, "report fetched");
  let disposition = route_report(&result, &cfg.output, cfg.email_to.as_deref(), out)?;

  if let Disposition::PersistedAndQueuedForDelivery { path } = &disposition {
    let request = build_delivery_request(path, &cfg.server, &cfg.recipients());
    dispatch(transport, &request)?;
  }

  Ok(disposition)
}
