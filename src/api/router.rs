//! Route table and CORS policy.
//!
//! Returns a composable `Router` that can be mounted on any axum server.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints::{appointments, doctors, patients};
use crate::api::types::ApiContext;

/// Build the full route table over the given store context.
///
/// Cross-origin callers are restricted to the configured origins, with
/// credentials permitted; an origin that fails to parse is skipped.
pub fn clinic_router(ctx: ApiContext, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/patients",
            get(patients::list).post(patients::create),
        )
        .route(
            "/patients/:id",
            put(patients::update).delete(patients::remove),
        )
        .route("/patients/by-doctor/:doctor_id", get(patients::by_doctor))
        .route("/doctors", get(doctors::list).post(doctors::create))
        .route(
            "/doctors/:id",
            put(doctors::update).delete(doctors::remove),
        )
        .route("/doctors/by-specialty", get(doctors::by_specialty))
        .route("/doctors/report", get(doctors::report))
        .route(
            "/appointments",
            get(appointments::list).post(appointments::create),
        )
        .route(
            "/appointments/:id",
            put(appointments::update).delete(appointments::remove),
        )
        .route("/appointments/report", get(appointments::report))
        .with_state(ctx)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::sqlite::open_memory_database;

    fn test_router() -> Router {
        let ctx = ApiContext::new(open_memory_database().unwrap());
        clinic_router(ctx, &["http://localhost:3000".to_string()])
    }

    #[tokio::test]
    async fn empty_store_lists_no_doctors() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/doctors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nurses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preflight_allows_configured_origin_with_credentials() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/patients")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn unconfigured_origin_gets_no_cors_headers() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/doctors")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
