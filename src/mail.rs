// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Mail a persisted report as an attachment through the external `mail` program
// role: delivery/dispatcher
// inputs: attachment path; server label; optional from/to/cc/bcc
// outputs: DeliveryRequest; `sh -c` command line; delivery outcome
// side_effects: Spawns `sh -c "echo ... | mail ..."` with inherited stdio
// invariants:
// - every interpolated value is passed through util::shell_quote
// - absent or blank address fields are omitted, never passed as ''
// - a non-zero child exit becomes Delivery{exit_code} with that exact code
// errors: Delivery; spawn failures and signal deaths map to exit code 1
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::process::Command;

use tracing::debug;

use crate::error::{ReportError, Result};
use crate::model::DeliveryRequest;
use crate::util::shell_quote;

pub const MESSAGE_BODY: &str = "Please, find attached the detailed report of deposits.";
pub const DEFAULT_MAIL_PROGRAM: &str = "mail";
pub const MAIL_PROGRAM_ENV: &str = "DD_DV_CLI_MAIL_PROGRAM";

pub fn subject_for(server_label: &str) -> String {
  format!("Deposits report ({})", server_label.to_uppercase())
}

#[derive(Debug, Clone, Default)]
pub struct Recipients {
  pub from: Option<String>,
  pub to: Option<String>,
  pub cc: Option<String>,
  pub bcc: Option<String>,
}

pub fn build_delivery_request(attachment_path: &str, server_label: &str, recipients: &Recipients) -> DeliveryRequest {
  DeliveryRequest {
    attachment_path: attachment_path.to_string(),
    subject: subject_for(server_label),
    body_text: MESSAGE_BODY.to_string(),
    from_address: non_blank(&recipients.from),
    to_addresses: non_blank(&recipients.to),
    cc_addresses: non_blank(&recipients.cc),
    bcc_addresses: non_blank(&recipients.bcc),
  }
}

fn non_blank(v: &Option<String>) -> Option<String> {
  v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Assemble the `echo <body> | <program> -s <subject> ...` pipeline.
///
/// The program name comes from configuration, not from the operator's report
/// flags, and is inserted as-is.
pub fn mail_command_line(req: &DeliveryRequest, program: &str) -> String {
  let mut cmd = format!("echo {} | {} -s {}", shell_quote(&req.body_text), program, shell_quote(&req.subject));

  let mut opt = |flag: &str, v: &Option<String>| {
    if let Some(v) = v {
      cmd.push_str(&format!(" {} {}", flag, shell_quote(v)));
    }
  };
  if !req.attachment_path.trim().is_empty() {
    opt("-a", &Some(req.attachment_path.clone()));
  }
  opt("-r", &req.from_address);
  opt("-c", &req.cc_addresses);
  opt("-b", &req.bcc_addresses);

  if let Some(to) = &req.to_addresses {
    cmd.push(' ');
    cmd.push_str(&shell_quote(to));
  }
  cmd
}

// --- Trait seam for the mail transport ---
pub trait MailTransport {
  /// Hand the request to the transport and return its exit status.
  fn send(&self, request: &DeliveryRequest) -> std::io::Result<i32>;
}

/// Runs the assembled command line through `sh -c`, stdio inherited.
pub struct ShellMailTransport {
  program: String,
}

impl ShellMailTransport {
  pub fn new(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }

  /// Program from `DD_DV_CLI_MAIL_PROGRAM`, falling back to `mail`.
  pub fn from_env() -> Self {
    let program = std::env::var(MAIL_PROGRAM_ENV)
      .ok()
      .filter(|p| !p.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_MAIL_PROGRAM.to_string());
    Self::new(program)
  }
}

impl MailTransport for ShellMailTransport {
  fn send(&self, request: &DeliveryRequest) -> std::io::Result<i32> {
    let line = mail_command_line(request, &self.program);
    debug!(command = %line, "executing mail command");

    let status = Command::new("sh").arg("-c").arg(&line).status()?;
    // Killed by a signal: no code to propagate.
    Ok(status.code().unwrap_or(1))
  }
}

pub fn dispatch(transport: &dyn MailTransport, request: &DeliveryRequest) -> Result<()> {
  match transport.send(request) {
    Ok(0) => Ok(()),
    Ok(exit_code) => Err(ReportError::Delivery { exit_code }),
    Err(e) => Err(ReportError::MailSpawn(e.to_string())),
  }
}
