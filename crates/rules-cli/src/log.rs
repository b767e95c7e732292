//! # Log Subcommand
//!
//! Builds a rules logger channel from a settings file (or the `RULES_*`
//! environment variables), registers a tracing sink and an in-memory screen
//! buffer, and routes one message through it.
//!
//! Records that pass the screen gate are printed to stdout, interpolated.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use rules_logger::{
    LogContext, LogOutcome, LoggerSettings, MemorySink, RulesLoggerChannel, TracingSink,
};

/// Arguments for the `rules log` subcommand.
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Logger settings (YAML or JSON). Defaults to the RULES_* environment.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// PSR-3 level name or RFC 5424 ordinal (0-7).
    #[arg(long, default_value = "info")]
    pub level: String,

    /// Message template; `{key}` is replaced from the context.
    pub message: String,

    /// Context entries as key=value. Values that parse as JSON keep their type.
    #[arg(long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,
}

/// Parse `key=value` pairs into a record context.
pub fn parse_context(pairs: &[String]) -> Result<LogContext> {
    let mut context = LogContext::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("context entry '{pair}' is not of the form key=value");
        };
        if key.is_empty() {
            bail!("context entry '{pair}' has an empty key");
        }
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        context.insert(key.to_string(), value);
    }
    Ok(context)
}

pub fn load_settings(path: Option<&PathBuf>) -> Result<LoggerSettings> {
    match path {
        Some(path) => LoggerSettings::from_path(path)
            .with_context(|| format!("failed to load logger settings {}", path.display())),
        None => LoggerSettings::from_env().context("invalid RULES_* logger environment"),
    }
}

/// Route the message and return the outcome together with the screen output.
pub fn route_message(args: &LogArgs) -> Result<(LogOutcome, Vec<String>)> {
    let settings = load_settings(args.settings.as_ref())?;
    let context = parse_context(&args.context)?;

    let channel = RulesLoggerChannel::new(settings);
    let screen = Arc::new(MemorySink::new());
    channel.add_logger(Arc::new(TracingSink));
    channel.add_logger(screen.clone());

    let logged = match args.level.trim().parse::<i64>() {
        Ok(ordinal) => channel.log(ordinal, &args.message, context),
        Err(_) => channel.log(args.level.trim(), &args.message, context),
    };
    let outcome = logged.context("failed to log message")?;

    let lines = screen
        .screen_records()
        .iter()
        .map(|record| format!("[{}] {}", record.severity, record.interpolate()))
        .collect();
    Ok((outcome, lines))
}

/// Execute the log subcommand.
///
/// Returns exit code 0 whether or not the message was filtered.
pub fn run_log(args: &LogArgs) -> Result<u8> {
    let (outcome, lines) = route_message(args)?;
    for line in &lines {
        println!("{line}");
    }

    if outcome.accepted() {
        tracing::info!(
            severity = %outcome.severity,
            persistent = outcome.persistent,
            screen = outcome.screen,
            sinks = outcome.forwarded,
            "message forwarded"
        );
    } else {
        tracing::info!(severity = %outcome.severity, "message filtered by both gates");
    }
    Ok(0)
}
