//! OpenTelemetry tracer provider and remote parent extraction.

use std::time::Duration;

use opentelemetry::{
    Context, KeyValue, global,
    propagation::Extractor,
    trace::TraceContextExt as _,
};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
use salvo::http::{HeaderMap, HeaderName};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let resource = Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(sample_ratio(
        config.otel_trace_sample_ratio,
    ))));

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Remote trace context carried by `traceparent`, if it names a valid span.
pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    let carrier = HeaderCarrier(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a request without trace headers
        // never inherits an in-process span.
        let context = propagator.extract_with_context(&Context::new(), &carrier);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

fn sample_ratio(configured: f64) -> f64 {
    if configured.is_nan() {
        return 1.0;
    }

    configured.clamp(0.0, 1.0)
}

struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ratio_is_clamped_to_unit_range() {
        assert!((sample_ratio(2.5) - 1.0).abs() < f64::EPSILON);
        assert!(sample_ratio(-1.0).abs() < f64::EPSILON);
        assert!((sample_ratio(0.25) - 0.25).abs() < f64::EPSILON);
        assert!((sample_ratio(f64::NAN) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_trace_headers_yield_no_parent() {
        assert!(remote_parent(&HeaderMap::new()).is_none());
    }
}
