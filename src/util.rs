// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shell quoting, logging setup, parent-directory creation, and man page rendering
// role: utilities/helpers
// inputs: Untrusted operator strings; paths; clap CommandFactory
// outputs: Single-quoted shell words, directories ensured, man page text
// side_effects: ensure_parent_dir creates directories; init_logging installs the global subscriber
// invariants:
// - shell_quote output is always exactly one literal word for a POSIX shell
// - ensure_parent_dir is a no-op for bare file names
// errors: IO errors bubble unchanged to the caller's stage
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

/// Wrap `s` in single quotes; embedded `'` become `'\''`.
///
/// Every operator-supplied string that ends up in a `sh -c` command line goes
/// through here, so the shell never sees it as more than one argument.
pub fn shell_quote(s: &str) -> String {
  format!("'{}'", s.replace('\'', r"'\''"))
}

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise `warn`, or `debug` for this crate when `verbose`.
pub fn init_logging(verbose: bool) {
  let fallback = if verbose { "warn,dd_dv_cli=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Create the parent directory of `path` (and its ancestors) when missing.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
    _ => Ok(()),
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
