//! Logging and trace export settings.

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Single-line logs for a terminal.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Base level or filter directives; noisy dependencies stay at warn unless named here
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trace export and request timing settings.
///
/// Export is off unless a collector is configured; a local run needs only
/// `DATABASE_URL`.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export request and service spans over OTLP.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces started by callers that send a `traceparent` header.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP exporter timeout in seconds.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// Service name attached to exported spans and used as the tracer name.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "shareit-json")]
    pub otel_service_name: String,

    /// Service version attached to exported spans.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// Deployment environment attached to exported spans.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Fraction of root traces to sample, from 0.0 to 1.0.
    #[arg(
        long,
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0_f64,
        value_parser = parse_sample_ratio
    )]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this are logged at warn.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

fn parse_sample_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw
        .parse()
        .map_err(|_err| format!("`{raw}` is not a number"))?;

    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("sample ratio must be between 0.0 and 1.0, got {ratio}"))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    #[test]
    fn export_is_off_by_default() -> TestResult {
        let cli = Cli::try_parse_from(["shareit-json"])?;

        assert!(!cli.observability.otel_enabled);
        assert!((cli.observability.otel_trace_sample_ratio - 1.0).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn sample_ratio_inside_unit_interval_is_accepted() -> TestResult {
        let cli = Cli::try_parse_from(["shareit-json", "--otel-trace-sample-ratio", "0.25"])?;

        assert!((cli.observability.otel_trace_sample_ratio - 0.25).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn sample_ratio_outside_unit_interval_is_rejected() {
        assert!(parse_sample_ratio("1.5").is_err(), "above 1 is rejected");
        assert!(parse_sample_ratio("-0.1").is_err(), "negative is rejected");
        assert!(parse_sample_ratio("NaN").is_err(), "NaN is rejected");
        assert!(parse_sample_ratio("half").is_err(), "non-numeric is rejected");
    }
}
