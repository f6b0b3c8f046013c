//! # Forge-Hooks CLI
//!
//! Command-line tooling around the forge-hooks intake pipeline.
//!
//! This module provides CLI commands for:
//! - Replaying a captured delivery through a hook
//! - Signing bodies to craft test deliveries
//! - Listing the events a provider understands
//! - Validating a hooks configuration file

mod hooks_file;

pub use hooks_file::{BasicAuthSettings, HookSettings, HookSummary, HooksFile, SecretSource};

use clap::{Args, Parser, Subcommand};
use forge_hooks_core::{
    providers::registry_for, sign_payload, AnyWebhook, Event, HmacAlgorithm, ParseError,
    ProviderKind, RawRequest, Schema, SigningError, WebhookOption,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// CLI Structure
// ============================================================================

/// Forge-Hooks CLI - verify and decode webhook deliveries
#[derive(Parser)]
#[command(name = "forge-hooks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify and decode webhook deliveries from source forges")]
pub struct Cli {
    /// Hooks configuration file
    #[arg(short, long, env = "FORGE_HOOKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level, used when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a captured delivery through a hook and print the decoded payload
    Parse(ParseArgs),

    /// Compute the HMAC signature of a body
    Sign {
        /// Digest algorithm
        #[arg(short, long, default_value = "sha256")]
        algorithm: HmacAlgorithm,

        /// Shared secret
        #[arg(short, long)]
        secret: String,

        /// File holding the body, or `-` for stdin
        #[arg(short, long)]
        body: PathBuf,

        /// Text prepended to the hex digest, e.g. `sha256=`
        #[arg(long)]
        prefix: Option<String>,
    },

    /// List the events a provider understands
    Events {
        /// Provider to list
        #[arg(short, long)]
        provider: ProviderKind,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a hooks configuration file
    CheckConfig {
        /// File to validate; defaults to --config
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the validated hooks
        #[arg(short, long)]
        show: bool,

        /// Output format for --show
        #[arg(short = 'f', long, default_value = "yaml")]
        format: ConfigFormat,
    },
}

/// Arguments of the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Provider to parse as, with credentials from the flags below
    #[arg(short, long, conflicts_with = "hook", required_unless_present = "hook")]
    pub provider: Option<ProviderKind>,

    /// Named hook from the configuration file
    #[arg(long)]
    pub hook: Option<String>,

    /// Accepted event identifier (repeatable); defaults to the hook's events
    #[arg(short, long = "event")]
    pub events: Vec<String>,

    /// Request header as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// HTTP method of the delivery
    #[arg(short, long, default_value = "POST")]
    pub method: String,

    /// File holding the raw body, or `-` for stdin
    #[arg(short, long)]
    pub body: PathBuf,

    /// Shared secret for HMAC or token providers
    #[arg(long, conflicts_with = "hook")]
    pub secret: Option<String>,

    /// Expected hook UUID
    #[arg(long, conflicts_with = "hook")]
    pub hook_uuid: Option<String>,

    /// Expected Basic credentials as `username:password`
    #[arg(long, conflicts_with = "hook")]
    pub basic_auth: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Configuration format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
    /// TOML format
    Toml,
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Delivery rejected: {0}")]
    Parse(#[from] ParseError),

    #[error("Signing failed: {0}")]
    Signing(#[from] SigningError),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Output failed: {message}")]
    Output { message: String },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::Parse(e) if e.is_auth_failure() => 3,
            Self::Parse(_) => 2,
            Self::Signing(_) | Self::InvalidArgument { .. } => 4,
            Self::Io(_) => 5,
            Self::Output { .. } => 6,
        }
    }

    fn invalid(arg: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg: arg.to_string(),
            message: message.into(),
        }
    }

    fn output(error: impl std::fmt::Display) -> Self {
        Self::Output {
            message: error.to_string(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration: {0}")]
    InvalidFormat(#[from] config::ConfigError),

    #[error("Unknown hook: {name}")]
    UnknownHook { name: String },

    #[error("Environment variable {var} is not set")]
    MissingEnvVar { var: String },

    #[error("Hook {hook} subscribes to unknown event {event}")]
    UnknownEvent { hook: String, event: Event },

    #[error("Hook {hook} is invalid: {source}")]
    Webhook {
        hook: String,
        #[source]
        source: forge_hooks_core::ConfigError,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Execute a parsed command line, writing results to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Parse(args) => execute_parse_command(args, config, out),
        Commands::Sign {
            algorithm,
            secret,
            body,
            prefix,
        } => execute_sign_command(algorithm, &secret, &body, prefix.as_deref(), out),
        Commands::Events { provider, format } => execute_events_command(provider, format, out),
        Commands::CheckConfig { file, show, format } => {
            let path = file.as_deref().or(config);
            execute_check_config_command(path, show, format, out)
        }
    }
}

/// Initialize logging based on CLI arguments
///
/// `RUST_LOG` takes precedence over `--log-level`. Logs go to stderr so that
/// command output on stdout stays machine-readable.
pub fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .map_err(|e| CliError::invalid("--log-level", e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).try_init()
    };
    result.map_err(CliError::output)
}

// ============================================================================
// Command Implementations
// ============================================================================

/// Execute parse command
fn execute_parse_command(
    args: ParseArgs,
    config: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (hook, default_events) = match (&args.hook, args.provider) {
        (Some(name), _) => {
            let path = config.ok_or_else(|| ConfigError::MissingRequired {
                key: "--config".to_string(),
            })?;
            let file = HooksFile::load(path)?;
            let settings = file.hook(name)?;
            (settings.build(name)?, settings.events.clone())
        }
        (None, Some(provider)) => {
            let hook = AnyWebhook::new(provider, flag_options(&args)?).map_err(|source| {
                ConfigError::Webhook {
                    hook: provider.to_string(),
                    source,
                }
            })?;
            (hook, Vec::new())
        }
        (None, None) => {
            return Err(CliError::invalid(
                "--provider",
                "either --provider or --hook is required",
            ))
        }
    };

    let events = if args.events.is_empty() {
        default_events
    } else {
        args.events.iter().map(|e| Event::new(e.as_str())).collect()
    };
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .map_err(|e| CliError::invalid("--method", e.to_string()))?;
    let headers = parse_headers(&args.headers)?;
    let body = open_body(&args.body)?;

    info!(
        provider = %hook.kind(),
        method = %method,
        subscribed = events.len(),
        "Parsing delivery"
    );

    let payload = hook.parse(RawRequest::new(method, headers, body), &events)?;

    match args.format {
        OutputFormat::Text => {
            writeln!(
                out,
                "{} {} ({})",
                payload.provider(),
                payload.event(),
                payload.schema()
            )?;
            render(payload.body(), OutputFormat::Json, out)
        }
        format => render(&payload, format, out),
    }
}

/// Execute sign command
fn execute_sign_command(
    algorithm: HmacAlgorithm,
    secret: &str,
    body: &Path,
    prefix: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut raw = Vec::new();
    open_body(body)?.read_to_end(&mut raw)?;

    debug!(algorithm = %algorithm, bytes = raw.len(), "Signing body");

    let signature = sign_payload(algorithm, secret.as_bytes(), &raw)?;
    writeln!(out, "{}{}", prefix.unwrap_or_default(), signature)?;
    Ok(())
}

#[derive(Serialize)]
struct EventEntry<'a> {
    event: &'a Event,
    schema: Schema,
}

/// Execute events command
fn execute_events_command(
    provider: ProviderKind,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let entries: Vec<EventEntry<'_>> = registry_for(provider)
        .entries()
        .iter()
        .map(|(event, schema)| EventEntry {
            event,
            schema: *schema,
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for entry in &entries {
                writeln!(out, "{}\t{}", entry.event, entry.schema)?;
            }
            Ok(())
        }
        format => render(&entries, format, out),
    }
}

/// Execute check-config command
fn execute_check_config_command(
    path: Option<&Path>,
    show: bool,
    format: ConfigFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let path = path.ok_or_else(|| ConfigError::MissingRequired {
        key: "--config".to_string(),
    })?;
    let file = HooksFile::load(path)?;
    if file.hooks.is_empty() {
        return Err(ConfigError::MissingRequired {
            key: "hooks".to_string(),
        }
        .into());
    }

    let mut summaries = BTreeMap::new();
    for (name, settings) in &file.hooks {
        summaries.insert(name.clone(), settings.validate(name)?);
    }

    info!(path = %path.display(), hooks = summaries.len(), "Configuration is valid");

    if !show {
        writeln!(out, "Configuration OK: {} hook(s)", summaries.len())?;
        return Ok(());
    }

    match format {
        ConfigFormat::Yaml => render(&summaries, OutputFormat::Yaml, out),
        ConfigFormat::Json => render(&summaries, OutputFormat::Json, out),
        ConfigFormat::Toml => {
            let rendered = toml::to_string(&summaries).map_err(CliError::output)?;
            out.write_all(rendered.as_bytes())?;
            Ok(())
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Credentials given on the command line, in flag order.
fn flag_options(args: &ParseArgs) -> Result<Vec<WebhookOption>, CliError> {
    let mut options = Vec::new();
    if let Some(secret) = &args.secret {
        options.push(WebhookOption::secret(secret.as_str()));
    }
    if let Some(uuid) = &args.hook_uuid {
        options.push(WebhookOption::hook_uuid(uuid.as_str()));
    }
    if let Some(credentials) = &args.basic_auth {
        let (username, password) = credentials
            .split_once(':')
            .ok_or_else(|| CliError::invalid("--basic-auth", "expected `username:password`"))?;
        options.push(WebhookOption::basic_auth(username, password));
    }
    Ok(options)
}

/// Parse `Name: value` pairs. Repeated names are kept as repeated headers.
fn parse_headers(raw: &[String]) -> Result<HeaderMap, CliError> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = entry.split_once(':').ok_or_else(|| {
            CliError::invalid("--header", format!("expected `Name: value`, got {entry:?}"))
        })?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| CliError::invalid("--header", e.to_string()))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|e| CliError::invalid("--header", e.to_string()))?;
        headers.append(name, value);
    }
    Ok(headers)
}

fn open_body(path: &Path) -> Result<Box<dyn Read>, CliError> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin()));
    }
    Ok(Box::new(File::open(path)?))
}

fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json | OutputFormat::Text => {
            serde_json::to_writer_pretty(&mut *out, value).map_err(CliError::output)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *out, value).map_err(CliError::output)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
