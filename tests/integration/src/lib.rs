//! End-to-end tests for the dynaexpr builders and compiler.
//!
//! Each test drives the public builder API, compiles the request, and checks
//! the serialized wire JSON exactly as a transport would send it.
//!
//! Run them with:
//! ```text
//! cargo test -p dynaexpr-integration
//! ```

use std::sync::Once;

use serde::Serialize;
use serde_json::Value;

#[cfg(test)]
mod test_condition;
#[cfg(test)]
mod test_determinism;
#[cfg(test)]
mod test_read;
#[cfg(test)]
mod test_sharing;
#[cfg(test)]
mod test_update;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Serialize a compiled input into the JSON a transport would send.
#[must_use]
pub fn wire_json<T: Serialize>(input: &T) -> Value {
    init_tracing();
    serde_json::to_value(input).unwrap_or_else(|e| panic!("failed to serialize input: {e}"))
}

/// Substitute placeholders back into an expression, for readable assertions.
///
/// Name aliases are replaced by attribute names and value aliases by their
/// JSON rendering. Longer aliases are replaced first so `#n1` never clobbers
/// `#n10`.
#[must_use]
pub fn resolve(expression: &str, wire: &Value) -> String {
    let mut substitutions: Vec<(String, String)> = Vec::new();
    if let Some(names) = wire["ExpressionAttributeNames"].as_object() {
        for (alias, name) in names {
            substitutions.push((alias.clone(), name.as_str().unwrap_or_default().to_owned()));
        }
    }
    if let Some(values) = wire["ExpressionAttributeValues"].as_object() {
        for (alias, value) in values {
            substitutions.push((alias.clone(), value.to_string()));
        }
    }
    substitutions.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

    let mut resolved = expression.to_owned();
    for (alias, replacement) in substitutions {
        resolved = resolved.replace(&alias, &replacement);
    }
    resolved
}
