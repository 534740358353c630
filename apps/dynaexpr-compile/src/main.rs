//! dynaexpr-compile - compile JSON operation descriptions into request inputs.
//!
//! Reads one `OperationRequest` document from the file named on the command
//! line (or stdin when no file, or `-`, is given) and prints the compiled
//! input as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! echo '{"Operation":"DeleteItem","TableName":"t","Key":{"id":{"S":"1"}}}' | dynaexpr-compile
//! dynaexpr-compile request.json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `DYNAEXPR_PRETTY` | `true` | Pretty-print the compiled JSON |

mod config;
mod request;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::CompileConfig;
use crate::request::OperationRequest;

/// Initialize the tracing subscriber, writing to stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let config = CompileConfig::from_env();
    init_tracing(&config.log_level)?;
    debug!(?config, "loaded configuration");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let source = read_source(path.as_deref())?;
    let request: OperationRequest =
        serde_json::from_str(&source).context("failed to parse operation request")?;

    let operation = request.operation();
    info!(operation, "compiling request");
    let compiled = request
        .compile()
        .with_context(|| format!("failed to compile {operation} request"))?;

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&compiled)
    } else {
        serde_json::to_string(&compiled)
    }
    .context("failed to render output")?;
    println!("{rendered}");

    Ok(())
}
