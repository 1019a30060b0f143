use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Origin serving the RapiDoc bundle used by `/docs`.
pub const RAPIDOC_SCRIPT_ORIGIN: &str = "https://unpkg.com";

/// Security headers configuration
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    pub script_sources: Vec<String>,
    pub is_production: bool,
}

impl SecurityHeadersConfig {
    pub fn new(script_sources: Vec<String>, is_production: bool) -> Self {
        Self {
            script_sources,
            is_production,
        }
    }

    /// Build Content-Security-Policy header value
    fn build_csp(&self) -> String {
        let script_src = if self.script_sources.is_empty() {
            "script-src 'self'".to_string()
        } else {
            format!("script-src 'self' {}", self.script_sources.join(" "))
        };

        [
            "default-src 'self'".to_string(),
            script_src,
            "style-src 'self' 'unsafe-inline'".to_string(),
            "img-src 'self' data:".to_string(),
            "connect-src 'self'".to_string(),
            "frame-ancestors 'none'".to_string(),
        ]
        .join("; ")
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // Production is served over HTTPS only.
    if config.is_production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    if let Ok(header_value) = HeaderValue::from_str(&config.build_csp()) {
        headers.insert("Content-Security-Policy", header_value);
    }

    // Upload acknowledgments are per-request and must never be cached.
    headers.insert(
        "Cache-Control",
        HeaderValue::from_static("no-store, private"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csp_includes_extra_script_sources() {
        let config = SecurityHeadersConfig::new(vec![RAPIDOC_SCRIPT_ORIGIN.to_string()], false);
        let csp = config.build_csp();
        assert!(csp.contains("script-src 'self' https://unpkg.com"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn csp_without_extra_sources() {
        let config = SecurityHeadersConfig::new(Vec::new(), true);
        assert!(config.build_csp().contains("script-src 'self';"));
    }
}
