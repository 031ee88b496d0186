use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{
            HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
        },
        Method,
    },
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
};

/// How the `Access-Control-Allow-Origin` response header is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPolicy {
    /// Always answer with the literal `*`.
    Wildcard,
    /// Echo the request `Origin` (falling back to `*` when absent) and mark
    /// the response with `Vary: Origin` so caches keep origins apart.
    Reflect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub origin_policy: OriginPolicy,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: Option<u32>,
}

impl CorsConfig {
    /// Open configuration for endpoints served to any page: wildcard origin,
    /// POST only, no preflight caching.
    pub fn public_wildcard() -> Self {
        Self {
            origin_policy: OriginPolicy::Wildcard,
            allowed_methods: vec!["POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["content-type".to_string()],
            max_age: None,
        }
    }

    /// Origin-reflecting configuration with a 24h preflight cache.
    pub fn reflect_origin() -> Self {
        Self {
            origin_policy: OriginPolicy::Reflect,
            allowed_methods: vec!["POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string(), "Authorization".to_string()],
            max_age: Some(86400),
        }
    }

    fn methods_header(&self) -> String {
        self.allowed_methods.join(", ")
    }

    fn headers_header(&self) -> String {
        self.allowed_headers.join(", ")
    }
}

#[derive(Clone)]
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    fn allow_origin_value(&self, origin: Option<&str>) -> HeaderValue {
        match self.config.origin_policy {
            OriginPolicy::Wildcard => HeaderValue::from_static("*"),
            OriginPolicy::Reflect => origin
                .and_then(|o| HeaderValue::from_str(o).ok())
                .unwrap_or_else(|| HeaderValue::from_static("*")),
        }
    }

    fn apply_headers(&self, headers: &mut HeaderMap, origin: Option<&str>) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin_value(origin));

        if let Ok(methods) = HeaderValue::from_str(&self.config.methods_header()) {
            headers.insert(ACCESS_CONTROL_ALLOW_METHODS, methods);
        }
        if let Ok(allowed) = HeaderValue::from_str(&self.config.headers_header()) {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, allowed);
        }
        if let Some(max_age) = self.config.max_age {
            if let Ok(value) = HeaderValue::from_str(&max_age.to_string()) {
                headers.insert(ACCESS_CONTROL_MAX_AGE, value);
            }
        }
        if self.config.origin_policy == OriginPolicy::Reflect {
            headers.insert(VARY, HeaderValue::from_static("Origin"));
        }
    }

    /// Preflight requests short-circuit to an empty 204 carrying the full
    /// configured header set.
    fn preflight_response(&self, origin: Option<&str>) -> HttpResponse {
        let mut response = HttpResponse::NoContent().finish();
        self.apply_headers(response.headers_mut(), origin);
        response
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddlewareService {
            service: Rc::new(service),
            middleware: self.clone(),
        }))
    }
}

pub struct CorsMiddlewareService<S> {
    service: Rc<S>,
    middleware: CorsMiddleware,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let middleware = self.middleware.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let origin = req
                .headers()
                .get(ORIGIN)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string());

            if req.method() == Method::OPTIONS {
                debug!("CORS preflight approved for {}", req.path());
                let response = middleware.preflight_response(origin.as_deref());
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            middleware.apply_headers(res.headers_mut(), origin.as_deref());
            Ok(res.map_into_left_body())
        })
    }
}
