//! OTLP span export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Upstream sampling decisions win; root spans are sampled at `ratio`.
fn sampler(ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(root_sample_ratio(ratio))))
}

/// `ratio` clamped to `[0, 1]`, with NaN meaning sample everything.
fn root_sample_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_ratios_are_clamped() {
        assert!((root_sample_ratio(4.0) - 1.0).abs() < f64::EPSILON);
        assert!(root_sample_ratio(-1.0).abs() < f64::EPSILON);
        assert!((root_sample_ratio(0.25) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn nan_ratio_samples_everything() {
        assert!((root_sample_ratio(f64::NAN) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sampler_defers_to_the_parent() {
        assert!(matches!(sampler(0.5), Sampler::ParentBased(_)));
    }
}
