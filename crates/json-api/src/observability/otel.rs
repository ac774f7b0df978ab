//! OpenTelemetry tracer provider setup.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

/// Builds a batch-exporting OTLP tracer provider tagged with the service identity.
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

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Respects the caller's sampling decision and samples new root traces by ratio.
fn sampler(ratio: f64) -> Sampler {
    let ratio = if ratio.is_nan() {
        1.0
    } else {
        ratio.clamp(0.0, 1.0)
    };

    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_ratio(sampler: &Sampler) -> Option<f64> {
        match sampler {
            Sampler::ParentBased(root) => match root.as_ref() {
                Sampler::TraceIdRatioBased(ratio) => Some(*ratio),
                _ => None,
            },
            _ => None,
        }
    }

    #[test]
    fn ratio_is_clamped_into_unit_range() {
        assert_eq!(root_ratio(&sampler(2.5)), Some(1.0));
        assert_eq!(root_ratio(&sampler(-1.0)), Some(0.0));
        assert_eq!(root_ratio(&sampler(0.25)), Some(0.25));
    }

    #[test]
    fn nan_ratio_samples_everything() {
        assert_eq!(root_ratio(&sampler(f64::NAN)), Some(1.0));
    }
}
