//! Tracing subscriber installation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

/// Dependencies that log per query or per frame; capped unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 6] = ["sqlx", "h2", "hyper", "tower", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    logging: &LoggingConfig,
    service_name: &str,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let fmt_layer = match logging.log_format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    };

    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_string()))
    });

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(&logging.log_level))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_unset| EnvFilter::new(directives(level)))
}

fn directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |directives, target| format!("{directives},{target}=warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisy_dependencies_are_capped_at_warn() {
        let directives = directives("debug");

        assert!(directives.starts_with("debug,"), "base level comes first");
        assert!(directives.contains("sqlx=warn"), "query logging is capped");
        assert!(directives.contains("hyper=warn"), "transport logging is capped");
    }

    #[test]
    fn directives_parse_as_a_filter() {
        assert!(
            EnvFilter::try_new(directives("info")).is_ok(),
            "default directives should be valid"
        );
    }
}
