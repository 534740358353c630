//! Compile CLI configuration.

use std::env;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Pretty-print the compiled JSON (default: true).
    pub pretty: bool,
}

impl CompileConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_owned()),
            pretty: env_bool("DYNAEXPR_PRETTY", true),
        }
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            pretty: true,
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}
