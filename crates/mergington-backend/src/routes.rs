use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::Redirect,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers;

fn cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = if cfg!(debug_assertions) {
        let dev_ports = [3000, 5173, 8000, 8080];
        dev_ports
            .iter()
            .flat_map(|port| {
                [
                    format!("http://localhost:{port}"),
                    format!("http://127.0.0.1:{port}"),
                ]
            })
            .filter_map(|origin| HeaderValue::from_str(&origin).ok())
            .collect()
    } else {
        // Production origins - add your domains here
        vec![]
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
}

/// Setup the routes for the server and configure CORS and request tracing
pub fn setup_routes(state: Arc<crate::AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/static/index.html") }))
        .route("/health", get(handlers::health::get))
        .route("/activities", get(handlers::activities::list))
        .route(
            "/activities/{activity}/signup",
            axum::routing::post(handlers::activities::signup)
                .delete(handlers::activities::unregister),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::services::ActivityServiceInMemory;

    fn app() -> Router {
        setup_routes(
            Arc::new(crate::AppState::new(ActivityServiceInMemory::default())),
            Path::new("static"),
        )
    }

    #[tokio::test]
    async fn root_redirects_to_front_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/static/index.html"
        );
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri("/activities/Chess%20Club/signup?email=a@b.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
