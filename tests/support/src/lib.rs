//! test-support: helpers for the dd-dv-cli integration tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```no_run
//! use test_support::{cmd_bin, StubServer};
//!
//! let server = StubServer::start(200, "a\nb\n");
//! let mut cmd = cmd_bin("dd-dv-cli");
//! cmd.args(["deposits-create-report", "-b", &server.base_url()]);
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// The mail program, base URL, and proxy variables are cleared so the host
/// environment never leaks into a test (ureq honors proxy env vars).
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    for var in [
        "DD_DV_CLI_MAIL_PROGRAM",
        "DD_MANAGE_DEPOSIT_URL",
        "RUST_LOG",
        "http_proxy",
        "HTTP_PROXY",
        "https_proxy",
        "HTTPS_PROXY",
        "all_proxy",
        "ALL_PROXY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// What the stub saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `GET /report?user=a HTTP/1.1`
    pub request_line: String,
    pub accept: Option<String>,
}

impl RecordedRequest {
    /// Path plus query of the request line.
    pub fn target(&self) -> &str {
        self.request_line.split(' ').nth(1).unwrap_or("")
    }
}

/// Minimal HTTP/1.1 server answering every request with the same canned response.
///
/// The accept loop runs on a detached thread for the rest of the test process.
pub struct StubServer {
    port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// `body` is served as raw bytes, so non-UTF-8 payloads work too.
    pub fn start(status: u16, body: impl AsRef<[u8]>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let port = listener.local_addr().expect("local addr").port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        let body = body.as_ref().to_vec();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                serve_one(stream, status, &body, &seen);
            }
        });

        Self { port, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

// Records the request before answering, so a finished client always finds it.
fn serve_one(stream: TcpStream, status: u16, body: &[u8], seen: &Mutex<Vec<RecordedRequest>>) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut accept = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("accept") {
                accept = Some(value.trim().to_string());
            }
        }
    }

    if let Ok(mut list) = seen.lock() {
        list.push(RecordedRequest { request_line: request_line.trim_end().to_string(), accept });
    }

    let reason = if status == 200 { "OK" } else { "Stub" };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let mut stream = stream;
    stream.write_all(head.as_bytes()).ok()?;
    stream.write_all(body).ok()?;
    stream.flush().ok()
}

/// Port on 127.0.0.1 with nothing listening.
pub fn closed_port() -> u16 {
    let l = TcpListener::bind("127.0.0.1:0").expect("bind");
    l.local_addr().expect("local addr").port()
}

/// A shell script standing in for `mail`.
///
/// Each invocation writes its arguments (one per line) to `args` and its
/// stdin to `stdin` inside `dir`, then exits with `exit_code`.
#[cfg(unix)]
pub struct FakeMail {
    pub dir: PathBuf,
    script: PathBuf,
}

#[cfg(unix)]
impl FakeMail {
    pub fn install(dir: &Path, exit_code: i32) -> Self {
        let script_path = dir.join("fake-mail");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{dir}/args'\ncat > '{dir}/stdin'\nexit {exit_code}\n",
            dir = dir.display(),
            exit_code = exit_code
        );
        std::fs::write(&script_path, script).expect("write fake mail");

        Self { dir: dir.to_path_buf(), script: script_path }
    }

    /// Value for `DD_DV_CLI_MAIL_PROGRAM`.
    ///
    /// Runs the script through `sh` rather than exec'ing a freshly written
    /// file, which can fail with ETXTBSY while other test threads fork.
    pub fn program(&self) -> String {
        format!("sh {}", self.script.display())
    }

    pub fn was_invoked(&self) -> bool {
        self.dir.join("args").exists()
    }

    /// Arguments of the last invocation, one element per argv entry.
    pub fn args(&self) -> Vec<String> {
        let s = std::fs::read_to_string(self.dir.join("args")).unwrap_or_default();
        s.lines().map(str::to_string).collect()
    }

    pub fn stdin(&self) -> String {
        std::fs::read_to_string(self.dir.join("stdin")).unwrap_or_default()
    }
}
