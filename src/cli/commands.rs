use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::CorsOptions;
use crate::cors::{Cors, Decision};
use crate::exchange::{HandlerRequest, HandlerResponse};

/// Command-line interface for brrtcors
///
/// Inspects a CORS configuration file and simulates requests against it.
#[derive(Parser)]
#[command(name = "brrtcors")]
#[command(about = "CORS policy inspector", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the normalized policy built from a configuration file
    Show {
        /// Path to the CORS configuration (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run one simulated request through the policy
    ///
    /// Prints the response status, the headers written, whether the inner
    /// handler ran, and the CORS decision.
    Check {
        /// Path to the CORS configuration (YAML, TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Request method, e.g. OPTIONS for a preflight
        #[arg(short, long)]
        method: String,

        /// Value of the Origin header
        #[arg(short, long)]
        origin: Option<String>,

        /// Value of Access-Control-Request-Method
        #[arg(long)]
        request_method: Option<String>,

        /// Value of Access-Control-Request-Headers
        #[arg(long)]
        request_headers: Option<String>,
    },
}

/// Outcome of `check`, printed as JSON
///
/// `body` is the handler's body, or `null` for a preflight answered by the
/// CORS layer.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub handler_called: bool,
    pub decision: Decision,
    pub body: Value,
}

/// Parse arguments from the process and run the selected command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Run `cli`, writing command output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Show { config } => {
            let cors = load_cors(&config)?;
            let summary = serde_json::to_string_pretty(&cors.store().summary())?;
            writeln!(out, "{summary}")?;
        }
        Commands::Check {
            config,
            method,
            origin,
            request_method,
            request_headers,
        } => {
            let cors = load_cors(&config)?;
            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("Invalid HTTP method: {method}"))?;
            let mut req = HandlerRequest::new(method, "/");
            if let Some(origin) = origin {
                req = req.with_header("Origin", origin);
            }
            if let Some(m) = request_method {
                req = req.with_header("Access-Control-Request-Method", m);
            }
            if let Some(h) = request_headers {
                req = req.with_header("Access-Control-Request-Headers", h);
            }
            let report = check(&cors, &req);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

/// Run `req` through `cors` wrapped around a handler that answers `200`.
#[must_use]
pub fn check(cors: &Cors, req: &HandlerRequest) -> CheckReport {
    let called = Cell::new(false);
    let service = cors.wrap(|_: &HandlerRequest| {
        called.set(true);
        HandlerResponse::json(200, json!({ "ok": true }))
    });
    let (res, decision) = service.call_with_decision(req);
    CheckReport {
        status: res.status,
        headers: res
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        handler_called: called.get(),
        decision,
        body: res.body,
    }
}

fn load_cors(config: &Path) -> Result<Cors> {
    let options = CorsOptions::load(config)
        .with_context(|| format!("Failed to load CORS config {}", config.display()))?
        .apply_env();
    Ok(Cors::new(&options))
}
