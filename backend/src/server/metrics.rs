//! Optional Prometheus metrics middleware wrapper.
//!
//! Wrapping with [`MetricsLayer`] keeps the app's service type identical
//! whether or not a registry could be built at startup.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Namespace prefixed to every exported metric.
const METRICS_NAMESPACE: &str = "user_api";

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    #[must_use]
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        match metrics {
            Some(metrics) => Self::Enabled(Arc::new(metrics)),
            None => Self::Disabled,
        }
    }
}

/// Build Prometheus middleware serving `/metrics`, or `None` when the
/// registry cannot be set up. Metrics never block startup.
pub(crate) fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics disabled: failed to build Prometheus middleware");
            None
        }
    }
}

/// Default Prometheus middleware for the service.
pub(crate) fn default_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint("/metrics")
            .build()
    })
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            MetricsLayer::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move {
                    let svc = fut.await?;
                    Ok(boxed::service(svc))
                })
            }
            MetricsLayer::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}
