#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::MockServer;

use hbnb_web::config::{
    BackendConfig, Config, ObservabilityConfig, ServerConfig, SessionConfig,
};

pub struct TestApp {
    pub router: Router,
    pub backend: MockServer,
}

impl TestApp {
    /// Starts a stub backend and a router pointed at it
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let router = hbnb_web::create_app(test_config(&backend.uri()));
        Self { router, backend }
    }

    /// A router whose backend address no longer accepts connections
    pub async fn unreachable() -> Self {
        let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", closed.local_addr().unwrap());
        drop(closed);

        let router = hbnb_web::create_app(test_config(&uri));
        Self {
            router,
            backend: MockServer::start().await,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Paths requested from the stub backend, in order
    pub async fn backend_paths(&self) -> Vec<String> {
        self.backend
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

pub fn test_config(backend_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        backend: BackendConfig {
            base_url: backend_url.to_string(),
        },
        session: SessionConfig {
            secure_cookie: true,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("theme=dark; token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, fields: &[(&str, &str)], token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={token}"));
    }
    let body = serde_urlencoded::to_string(fields).unwrap();
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string())
}
