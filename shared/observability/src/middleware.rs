//! HTTP middleware that logs one structured line per handled request:
//! method, path, status, duration, and a generated request id.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestLoggingConfig {
    /// Service name for log attribution
    pub service_name: String,
    /// Paths excluded from logging (health probes and the like)
    pub exclude_paths: Vec<String>,
    /// Threshold in ms above which a request logs at warn level
    pub slow_request_threshold_ms: u64,
}

impl Default for RequestLoggingConfig {
    fn default() -> Self {
        Self {
            service_name: "storefront".to_string(),
            exclude_paths: vec!["/health".to_string(), "/favicon.ico".to_string()],
            slow_request_threshold_ms: 1000,
        }
    }
}

impl RequestLoggingConfig {
    pub fn for_service(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_slow_threshold(mut self, ms: u64) -> Self {
        self.slow_request_threshold_ms = ms;
        self
    }

    pub fn exclude_path(mut self, path: impl Into<String>) -> Self {
        self.exclude_paths.push(path.into());
        self
    }
}

#[derive(Clone)]
pub struct RequestLogger {
    config: RequestLoggingConfig,
}

impl RequestLogger {
    pub fn new(config: RequestLoggingConfig) -> Self {
        Self { config }
    }

    pub fn for_service(name: impl Into<String>) -> Self {
        Self::new(RequestLoggingConfig::for_service(name))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct RequestLoggerService<S> {
    service: Rc<S>,
    config: RequestLoggingConfig,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let skip = config.exclude_paths.iter().any(|p| req.path() == p);
        let method = req.method().to_string();
        let path = req.path().to_string();
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            if !skip {
                let duration_ms = started.elapsed().as_millis() as u64;
                let status = res.status().as_u16();

                if duration_ms >= config.slow_request_threshold_ms {
                    warn!(
                        service = %config.service_name,
                        request_id = %request_id,
                        method = %method,
                        path = %path,
                        status,
                        duration_ms,
                        "slow request"
                    );
                } else {
                    info!(
                        service = %config.service_name,
                        request_id = %request_id,
                        method = %method,
                        path = %path,
                        status,
                        duration_ms,
                        "request completed"
                    );
                }
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_builders() {
        let config = RequestLoggingConfig::for_service("storefront-api")
            .with_slow_threshold(250)
            .exclude_path("/metrics");

        assert_eq!(config.service_name, "storefront-api");
        assert_eq!(config.slow_request_threshold_ms, 250);
        assert!(config.exclude_paths.iter().any(|p| p == "/metrics"));
        assert!(config.exclude_paths.iter().any(|p| p == "/health"));
    }
}
