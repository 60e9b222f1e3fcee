//! Logging subscriber initialisation.

use opentelemetry_sdk::trace::SdkTracer;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

const NOISY_CRATES: &str = "h2=warn,hyper=warn,tower=warn,tonic=warn,sqlx=warn,opentelemetry=warn";

pub(super) fn init_subscriber(
    config: &LoggingConfig,
    tracer: Option<SdkTracer>,
) -> Result<(), ObservabilityError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            tracer,
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            tracer,
        ),
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)))
}

fn default_directives(log_level: &str) -> String {
    format!("{log_level},{NOISY_CRATES}")
}

fn init_with_layer<L>(
    config: &LoggingConfig,
    fmt_layer: L,
    tracer: Option<SdkTracer>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(config));

    match tracer {
        Some(tracer) => subscriber
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}
