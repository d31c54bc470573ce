// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failures of the report pipeline and their process exit codes
// role: errors/taxonomy
// outputs: ReportError enum; exit_code mapping
// invariants:
// - argument conflicts map to 2; transport/remote/persistence map to 1
// - delivery failures carry the mail program's own exit code
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

pub type Result<T, E = ReportError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ReportError {
  #[error("Specify either --startdate or --age, not both")]
  ConflictingFilter,

  #[error("Invalid filter: {0}")]
  InvalidFilter(String),

  #[error("Error contacting manage-deposit service: {0}")]
  Transport(String),

  #[error("ManageDeposit:create_report() - HTTP {status}")]
  RemoteReport { status: u16 },

  #[error("Failed to write report to {path}: {source}")]
  Persistence {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Error executing mail command: {0}")]
  MailSpawn(String),

  #[error("Failed to send email (mail utility returned exit code {exit_code})")]
  Delivery { exit_code: i32 },
}

impl ReportError {
  /// Process exit code an operator sees for this failure.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::ConflictingFilter | Self::InvalidFilter(_) => 2,
      Self::Transport(_) | Self::RemoteReport { .. } | Self::Persistence { .. } | Self::MailSpawn(_) => 1,
      Self::Delivery { exit_code } => *exit_code,
    }
  }
}
