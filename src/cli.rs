use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::Result;
use crate::mail::Recipients;
use crate::model::ReportRequest;

#[derive(Parser, Debug)]
#[command(
    name = "dd-dv-cli",
    version,
    about = "Dataverse command-line interface",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
  /// Log debug details (request URL, mail command) to stderr
  #[arg(long, global = true)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  #[command(subcommand)]
  pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Create report based on dd-manage-deposit database
  DepositsCreateReport(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
  /// Base URL of dd-manage-deposit service, e.g., http://host:port
  #[arg(short = 'b', long = "service-baseurl", env = "DD_MANAGE_DEPOSIT_URL")]
  pub service_baseurl: String,

  /// Output file path or '-' for stdout
  #[arg(short = 'o', long = "output-file", default_value = "-")]
  pub output_file: String,

  /// Filter until the record creation of this date (YYYY-MM-DD)
  #[arg(short = 'e', long)]
  pub enddate: Option<String>,

  /// Filter from the record creation of this date (YYYY-MM-DD)
  #[arg(short = 's', long)]
  pub startdate: Option<String>,

  /// Filter records not older than this many days before today
  #[arg(short = 'a', long)]
  pub age: Option<u32>,

  /// The state of the deposit (repeatable, comma-separated)
  #[arg(short = 't', long = "state", value_delimiter = ',')]
  pub states: Vec<String>,

  /// The depositor name (repeatable, comma-separated)
  #[arg(short = 'u', long = "user", value_delimiter = ',')]
  pub users: Vec<String>,

  /// Output data format for Accept header
  #[arg(short = 'f', long, default_value = "text/csv")]
  pub format: String,

  /// Server label for email subject (prod/demo/..)
  #[arg(short = 'v', long, default_value = "unknown server")]
  pub server: String,

  /// From address for emailing the report
  #[arg(short = 'r', long = "from")]
  pub email_from: Option<String>,

  /// Recipient email(s), comma-separated
  #[arg(long = "email-to")]
  pub email_to: Option<String>,

  /// CC email(s), comma-separated
  #[arg(long = "cc-email-to")]
  pub cc_email_to: Option<String>,

  /// BCC email(s), comma-separated
  #[arg(long = "bcc-email-to")]
  pub bcc_email_to: Option<String>,

  /// Override "today" for --age (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EffectiveConfig {
  pub request: ReportRequest,
  pub output: String,
  pub server: String,
  pub email_from: Option<String>,
  pub email_to: Option<String>,
  pub cc_email_to: Option<String>,
  pub bcc_email_to: Option<String>,
}

impl EffectiveConfig {
  pub fn recipients(&self) -> Recipients {
    Recipients {
      from: self.email_from.clone(),
      to: self.email_to.clone(),
      cc: self.cc_email_to.clone(),
      bcc: self.bcc_email_to.clone(),
    }
  }
}

/// Normalize report flags into the configuration the pipeline runs on.
///
/// This is where `--age` becomes a start date; a conflicting `--startdate`
/// fails here, before anything touches the network.
pub fn normalize(args: ReportArgs) -> Result<EffectiveConfig> {
  let today = dates::effective_today(dates::parse_today(args.now_override.as_deref())?);
  let start_date = dates::resolve_start_date(args.startdate.as_deref(), args.age, today)?;

  let request = ReportRequest {
    service_base_url: args.service_baseurl.trim().to_string(),
    start_date,
    end_date: args.enddate,
    age_days: None,
    states: drop_blank(args.states),
    users: drop_blank(args.users),
    accept_format: args.format,
  };

  Ok(EffectiveConfig {
    request,
    output: args.output_file,
    server: args.server,
    email_from: blank_to_none(args.email_from),
    email_to: blank_to_none(args.email_to),
    cc_email_to: blank_to_none(args.cc_email_to),
    bcc_email_to: blank_to_none(args.bcc_email_to),
  })
}

fn blank_to_none(v: Option<String>) -> Option<String> {
  v.filter(|s| !s.trim().is_empty())
}

// `--state a,,b` splits into an empty element; the service never wants `state=`.
fn drop_blank(v: Vec<String>) -> Vec<String> {
  v.into_iter().filter(|s| !s.trim().is_empty()).collect()
}
