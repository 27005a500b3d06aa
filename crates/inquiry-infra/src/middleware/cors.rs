use axum::http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
];

/// CORS headers middleware
///
/// Adds the same permissive CORS headers to every response, error
/// responses included. Preflight requests are answered by the routes
/// themselves so they can carry a body.
pub async fn cors_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{middleware, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_headers_on_success_and_error() {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/fail",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .layer(middleware::from_fn(cors_headers_middleware));
        let server = TestServer::new(app).unwrap();

        for path in ["/ok", "/fail", "/missing"] {
            let response = server.get(path).await;
            assert_eq!(response.header("access-control-allow-origin"), "*");
            assert_eq!(
                response.header("access-control-allow-methods"),
                "GET, POST, OPTIONS"
            );
            assert_eq!(
                response.header("access-control-allow-headers"),
                "Content-Type, Authorization"
            );
        }
    }
}
