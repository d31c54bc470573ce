// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Decide where a fetched report goes: stdout, a file, or a file plus mail delivery
// role: output/router
// inputs: ReportResult; destination selector ("-" or path); optional primary recipient
// outputs: Disposition tag consumed by the pipeline
// side_effects: Writes to stdout or to the destination file; creates parent directories
// invariants:
// - "-" always displays and never delivers
// - a body that is not multi-line is never written and never delivered
// - delivery is queued only after a successful write and with a non-blank recipient
// errors: Persistence with the destination path on directory/write failures
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::model::ReportResult;
use crate::util;

pub const STDOUT_SELECTOR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
  /// Body went to stdout.
  Displayed,
  /// Zero or one line: nothing persisted, nothing mailed.
  Empty,
  PersistedOnly { path: String },
  PersistedAndQueuedForDelivery { path: String },
}

pub fn route_report(
  result: &ReportResult,
  destination: &str,
  recipient: Option<&str>,
  out: &mut dyn Write,
) -> Result<Disposition> {
  let disposition = if destination == STDOUT_SELECTOR {
    out.write_all(&result.body).and_then(|_| out.flush()).map_err(stdout_err)?;
    Disposition::Displayed
  } else if !result.is_multi_line {
    writeln!(out, "Report is empty.").map_err(stdout_err)?;
    Disposition::Empty
  } else {
    persist(&result.body, destination)?;
    writeln!(out, "Report written to {}", destination).map_err(stdout_err)?;

    match recipient {
      Some(to) if !to.trim().is_empty() => Disposition::PersistedAndQueuedForDelivery { path: destination.to_string() },
      _ => Disposition::PersistedOnly { path: destination.to_string() },
    }
  };

  debug!(?disposition, "report routed");
  Ok(disposition)
}

fn stdout_err(source: std::io::Error) -> ReportError {
  ReportError::Persistence { path: STDOUT_SELECTOR.into(), source }
}

fn persist(body: &[u8], destination: &str) -> Result<()> {
  let path = Path::new(destination);
  let to_err = |source| ReportError::Persistence { path: destination.to_string(), source };

  util::ensure_parent_dir(path).map_err(to_err)?;
  std::fs::write(path, body).map_err(to_err)
}
