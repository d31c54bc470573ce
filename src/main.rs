use std::process::ExitCode;

use clap::Parser;

mod cli;
mod dates;
mod error;
mod fetch;
mod mail;
mod model;
mod output;
mod pipeline;
mod query;
mod util;

use crate::cli::{normalize, Cli, Commands};
use crate::fetch::HttpReportClient;
use crate::mail::ShellMailTransport;

fn main() -> ExitCode {
  let cli = Cli::parse();
  util::init_logging(cli.verbose);

  if cli.gen_man {
    return match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        ExitCode::SUCCESS
      }
      Err(e) => {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
      }
    };
  }

  let Some(command) = cli.command else {
    eprintln!("Error: no command given; see --help");
    return ExitCode::from(2);
  };

  let code = match command {
    Commands::DepositsCreateReport(args) => run_deposits_report(args),
  };
  ExitCode::from(clamp_exit_code(code))
}

fn run_deposits_report(args: cli::ReportArgs) -> i32 {
  // Phase 1: normalize flags (resolves --age, rejects --startdate + --age)
  // Phase 2: fetch, route, deliver
  let result = normalize(args).and_then(|cfg| {
    let client = HttpReportClient::new();
    let transport = ShellMailTransport::from_env();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run_report(&cfg, &client, &transport, &mut out)
  });

  match result {
    Ok(_) => 0,
    Err(e) => {
      eprintln!("Error: {}", e);
      e.exit_code()
    }
  }
}

// Shells only see the low byte of an exit status.
fn clamp_exit_code(code: i32) -> u8 {
  match u8::try_from(code) {
    Ok(c) => c,
    Err(_) => 1,
  }
}
