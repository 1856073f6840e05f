use anyhow::Result;
use std::path::PathBuf;

/// Output format for the generated report artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CliCommand {
    Report {
        tenant_id: Option<i64>,
        output: Option<PathBuf>,
        format: OutputFormat,
    },
    Check {
        tenant_id: Option<i64>,
    },
    Help,
    Version,
}

pub(crate) fn version_text() -> String {
    format!("netbox-report {}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn usage_text() -> String {
    format!(
        "{version}
NetBox Tenant Report — Infrastructure Documentation CLI

Usage:
  netbox-report [report] [--tenant <ID>] [--output <FILE>] [--format <pdf|json>]
  netbox-report check [--tenant <ID>]
  netbox-report --help
  netbox-report --version

Environment:
  NETBOX_URL     Base API URL, e.g. https://netbox.example.com/api/
  NETBOX_TOKEN   API token for the Authorization header
  TENANT_ID      Default tenant to report on

Options:
  -t, --tenant <ID>     Tenant id (overrides TENANT_ID)
  -o, --output <FILE>   Output file path (default: {{tenant}}_{{timestamp}}.pdf)
      --format <FMT>    Output format: pdf (default) or json
  -h, --help            Show this help text
  -V, --version         Show version",
        version = version_text()
    )
}

fn parse_i64_arg(flag: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().ok().filter(|v| *v > 0).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid value for {}: '{}'. Expected a positive integer id.\n\n{}",
            flag,
            raw,
            usage_text()
        )
    })
}

fn parse_format_arg(raw: &str) -> Result<OutputFormat> {
    match raw.to_ascii_lowercase().as_str() {
        "pdf" => Ok(OutputFormat::Pdf),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow::anyhow!(
            "Invalid value for --format: '{}'. Expected 'pdf' or 'json'.\n\n{}",
            raw,
            usage_text()
        )),
    }
}

pub(crate) fn parse_cli_args<I, S>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = args.into_iter();
    let _program_name = iter.next();

    let mut command: Option<String> = None;
    let mut tenant_id: Option<i64> = None;
    let mut output: Option<PathBuf> = None;
    let mut format = OutputFormat::Pdf;

    while let Some(arg) = iter.next() {
        let arg = arg.as_ref();
        match arg {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "report" | "check" => {
                if command.as_deref().is_some_and(|existing| existing != arg) {
                    return Err(anyhow::anyhow!(
                        "Multiple commands provided. Use only one command.\n\n{}",
                        usage_text()
                    ));
                }
                command = Some(arg.to_string());
            }
            "-t" | "--tenant" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("Missing value for --tenant.\n\n{}", usage_text())
                })?;
                tenant_id = Some(parse_i64_arg("--tenant", value.as_ref())?);
            }
            "-o" | "--output" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("Missing value for --output.\n\n{}", usage_text())
                })?;
                output = Some(PathBuf::from(value.as_ref()));
            }
            "--format" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("Missing value for --format.\n\n{}", usage_text())
                })?;
                format = parse_format_arg(value.as_ref())?;
            }
            _ if arg.starts_with("--tenant=") => {
                tenant_id = Some(parse_i64_arg("--tenant", &arg["--tenant=".len()..])?);
            }
            _ if arg.starts_with("--output=") => {
                output = Some(PathBuf::from(&arg["--output=".len()..]));
            }
            _ if arg.starts_with("--format=") => {
                format = parse_format_arg(&arg["--format=".len()..])?;
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown argument: '{}'.\n\n{}",
                    arg,
                    usage_text()
                ));
            }
        }
    }

    match command.as_deref() {
        Some("check") => Ok(CliCommand::Check { tenant_id }),
        _ => Ok(CliCommand::Report {
            tenant_id,
            output,
            format,
        }),
    }
}
