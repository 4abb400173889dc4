/// URL for accessing the PostgreSQL database (should contain a database name in the path)
pub const DB_URL: &str = "DATABASE_URL";
/// Log level configuration for the application. For formatting info, see
/// [tracing-subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Socket address the HTTP server binds to. Defaults to 0.0.0.0:8000
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";

/// Directory containing the pre-built front-end files. The SPA entry document is
/// expected at `<STATIC_DIR>/index.html`, bundled assets under `<STATIC_DIR>/assets`.
/// Defaults to "static"
pub const STATIC_DIR: &str = "STATIC_DIR";

/// Comma-separated allow-list of origins permitted to make credentialed CORS requests.
/// Defaults to the local development origins of the bundled front-end
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";
