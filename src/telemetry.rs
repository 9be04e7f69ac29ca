use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with conditional JSON/text output.
///
/// Set `LOG_FORMAT=json` for structured logs in production; anything else
/// keeps the human-readable formatter. `RUST_LOG` controls filtering.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,recruitment_client=debug".into());

    if use_json {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    }
}
