//! Status Report CLI
//!
//! Reports status codes and inspects the registry built from configuration.

use clap::{Parser, Subcommand};
use status_logger::{
    ReportRequest, Severity, StatusConfig, StatusDescriptor, StatusRegistry, StatusReporter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "status-report")]
#[command(about = "Log status codes and print normalized response envelopes")]
struct Cli {
    /// Extra config file layered over the default locations
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a status code and print the envelope
    Report {
        /// Status code
        #[arg(allow_negative_numbers = true)]
        code: i64,
        /// Message override
        #[arg(short, long)]
        message: Option<String>,
        /// Payload as JSON
        #[arg(short, long)]
        payload: Option<String>,
        /// Error text attached to the report
        #[arg(short, long)]
        error: Option<String>,
        /// Override the configured silent mode for this call
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        silent: Option<bool>,
    },

    /// Print the full status table
    Schema,

    /// Print the message registered for a class and code
    Lookup {
        /// SUCCESS, WARN or ERROR
        class: String,
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },

    /// Print the class a code falls into
    Classify {
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StatusConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    // stdout carries only the rendered JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_request(
    code: i64,
    message: Option<String>,
    payload: Option<String>,
    error: Option<String>,
    silent: Option<bool>,
) -> anyhow::Result<ReportRequest> {
    let status = match message {
        Some(message) => StatusDescriptor::with_message(code, message),
        None => StatusDescriptor::new(code),
    };

    let mut request = ReportRequest::new(status);
    if let Some(payload) = payload {
        request = request.payload(serde_json::from_str(&payload)?);
    }
    if let Some(error) = error {
        request = request.error(error);
    }
    if let Some(silent) = silent {
        request = request.silent(silent);
    }
    Ok(request)
}

fn run(command: Commands, config: &StatusConfig) -> anyhow::Result<()> {
    let registry = StatusRegistry::from_config(config)?;
    let format = config.output.format;

    match command {
        Commands::Report { code, message, payload, error, silent } => {
            let request = build_request(code, message, payload, error, silent)?;
            let envelope = StatusReporter::new(&registry).report(&request);
            println!("{}", format.render(&envelope)?);
        }

        Commands::Schema => {
            println!("{}", format.render(&registry.schema())?);
        }

        Commands::Lookup { class, code } => {
            let severity: Severity = class.parse()?;
            match registry.status_message(severity, code) {
                Some(message) => println!("{}", message),
                None => anyhow::bail!("no status {} registered under {}", code, severity),
            }
        }

        Commands::Classify { code } => match registry.classify(code) {
            Some(severity) => println!("{}", severity),
            None => println!("unclassified"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use status_logger::{OutputFormat, RecordingSink, UNCLASSIFIED_ERROR};

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    fn report_args(command: Commands) -> (i64, Option<bool>) {
        match command {
            Commands::Report { code, silent, .. } => (code, silent),
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_codes_outside_u16_parse() {
        assert_eq!(report_args(parse(&["status-report", "report", "70000"])).0, 70000);
        assert_eq!(report_args(parse(&["status-report", "report", "-1"])).0, -1);
        assert!(matches!(
            parse(&["status-report", "classify", "-42"]),
            Commands::Classify { code: -42 }
        ));
    }

    #[test]
    fn test_silent_flag_both_ways() {
        assert_eq!(report_args(parse(&["status-report", "report", "200"])).1, None);
        assert_eq!(report_args(parse(&["status-report", "report", "200", "--silent"])).1, Some(true));
        assert_eq!(
            report_args(parse(&["status-report", "report", "200", "--silent", "false"])).1,
            Some(false)
        );
    }

    #[test]
    fn test_silent_false_overrides_config() {
        let mut config = StatusConfig::default();
        config.registry.silent_mode = true;
        let registry = StatusRegistry::from_config(&config).unwrap();

        let sink = RecordingSink::new();
        let request = build_request(200, None, None, None, Some(false)).unwrap();
        StatusReporter::with_sink(&registry, &sink).report(&request);
        assert!(!sink.is_empty());

        let sink = RecordingSink::new();
        let request = build_request(200, None, None, None, None).unwrap();
        StatusReporter::with_sink(&registry, &sink).report(&request);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_out_of_range_code_renders_unclassified() {
        let registry = StatusRegistry::new();
        for code in [-1, 70000] {
            let request = build_request(code, None, Some(r#"{"a":1}"#.to_string()), None, Some(true)).unwrap();
            let envelope = StatusReporter::new(&registry).report(&request);
            let rendered = OutputFormat::Compact.render(&envelope).unwrap();

            let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
            assert_eq!(value["error"], serde_json::json!(UNCLASSIFIED_ERROR));
            assert_eq!(value["status"]["code"], serde_json::json!(code));
        }
    }
}
