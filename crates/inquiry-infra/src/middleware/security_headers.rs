use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};

static CACHED_IS_PRODUCTION: std::sync::LazyLock<bool> = std::sync::LazyLock::new(|| {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|e| e.to_lowercase() == "production" || e.to_lowercase() == "prod")
        .unwrap_or(false)
});

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    // The site is never framed
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // HSTS only in production, where TLS is terminated in front of the server
    if *CACHED_IS_PRODUCTION {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    // Static pages load their own scripts, styles and fonts; the form posts
    // back to the same origin
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; img-src 'self' data: https:; font-src 'self' data: https://fonts.gstatic.com; connect-src 'self'; form-action 'self'; frame-ancestors 'none'"),
    );

    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{middleware, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(security_headers_middleware));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").await;
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(response.header("x-frame-options"), "DENY");
        assert!(response
            .header("content-security-policy")
            .to_str()
            .unwrap()
            .contains("form-action 'self'"));
    }
}
