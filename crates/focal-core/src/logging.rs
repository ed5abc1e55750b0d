//! Tracing subscriber setup.
//!
//! Called once from the binary. `FOCAL_LOG` (or the standard `RUST_LOG`)
//! controls the filter; the default keeps focal crates at `info` and the
//! rest of the dependency tree at `warn`.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `FOCAL_LOG` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn,focal=info,focal_server=info,focal_store=info,focal_auth=info,focal_search=info,focal_llm=info";

/// Initialize the global tracing subscriber.
///
/// Safe to call once per process; a second call is a no-op (the global
/// default can only be set once, and we ignore the failure).
pub fn init_tracing() {
    let filter = std::env::var("FOCAL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(|_| EnvFilter::new(DEFAULT_FILTER), EnvFilter::new);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
