use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::hazard_reports::dtos::{MAX_IMAGES, MAX_IMAGE_SIZE};
use crate::features::hazard_reports::handlers;
use crate::features::hazard_reports::services::HazardReportService;

/// Room for the text fields and multipart framing around the images
const FORM_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the hazard reports feature
///
/// Note: Callers must layer session token verification on top of these routes
pub fn routes(service: Arc<HazardReportService>) -> Router {
    Router::new()
        .route(
            "/api/hazard-reports",
            post(handlers::create_hazard_report)
                .layer(DefaultBodyLimit::max(
                    MAX_IMAGES * MAX_IMAGE_SIZE + FORM_OVERHEAD,
                ))
                .get(handlers::get_all_hazard_reports),
        )
        .route(
            "/api/hazard-reports/user",
            get(handlers::get_user_hazard_count)
                .put(handlers::update_hazard_report_at_user_path)
                .patch(handlers::update_hazard_report_at_user_path)
                .delete(handlers::delete_hazard_report_at_user_path),
        )
        .route(
            "/api/hazard-reports/{id}",
            get(handlers::get_hazard_report_by_id)
                .put(handlers::update_hazard_report)
                .patch(handlers::update_hazard_report)
                .delete(handlers::delete_hazard_report),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::modules::storage::MemoryStorage;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::{create_reporter_user, with_authenticated_user};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "hazard-test-boundary";

    struct TestApp {
        store: Arc<MemoryStore>,
        storage: Arc<MemoryStorage>,
    }

    impl TestApp {
        fn new() -> Self {
            Self {
                store: Arc::new(MemoryStore::new()),
                storage: Arc::new(MemoryStorage::new()),
            }
        }

        fn router(&self, user: Option<AuthenticatedUser>) -> Router {
            let service = Arc::new(HazardReportService::new(
                self.store.clone(),
                self.store.clone(),
                self.storage.clone(),
            ));
            let router = routes(service);
            match user {
                Some(user) => with_authenticated_user(router, user),
                None => router,
            }
        }

        async fn send(
            &self,
            user: Option<AuthenticatedUser>,
            request: Request<Body>,
        ) -> (StatusCode, Value) {
            let response = self.router(user).oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        /// Create a report through the API as `owner` and return its JSON
        async fn create_as(&self, owner: &AuthenticatedUser, report_type: &str) -> Value {
            let description: String = Sentence(3..8).fake();
            let request = create_request(
                &[
                    ("reportType", report_type),
                    ("description", &description),
                    ("status", "open"),
                ],
                &[],
            );
            let (status, body) = self.send(Some(owner.clone()), request).await;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            body["hazardReport"].clone()
        }
    }

    fn create_request(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        for (filename, content_type, data) in files {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    BOUNDARY, filename, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/hazard-reports")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn spill_update() -> Value {
        json!({ "reportType": "spill", "description": "mopped up", "status": "closed" })
    }

    #[tokio::test]
    async fn test_create_returns_created_report() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());

        let request = create_request(
            &[
                ("reportType", "spill"),
                ("description", "oil on floor"),
                ("status", "open"),
                ("unexpected", "ignored"),
            ],
            &[("photo.png", "image/png", b"not really a png")],
        );
        let (status, body) = app.send(Some(caller), request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Hazard Report created successfully");
        let report = &body["hazardReport"];
        assert_eq!(report["reportType"], "spill");
        assert_eq!(report["description"], "oil on floor");
        assert_eq!(report["status"], "open");
        assert_eq!(report["user"], owner.id.to_string());

        let images = report["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].as_str().unwrap().ends_with(".png"));
        assert_eq!(app.storage.objects().len(), 1);

        let id = report["id"].as_str().unwrap();
        let reports = app.store.user(owner.id).unwrap().reports;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), id);
    }

    #[tokio::test]
    async fn test_create_grows_report_list_by_one() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());
        app.create_as(&caller, "spill").await;

        let (_, before) = app
            .send(Some(caller.clone()), empty_request(Method::GET, "/api/hazard-reports"))
            .await;
        app.create_as(&caller, "debris").await;
        let (status, after) = app
            .send(Some(caller), empty_request(Method::GET, "/api/hazard-reports"))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(after["message"], "All Hazard Reports retrieved successfully");
        assert_eq!(after["count"], before["count"].as_u64().unwrap() + 1);
        assert_eq!(after["hazardReports"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_rejected() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");

        let request = create_request(&[("reportType", "spill"), ("description", "d")], &[]);
        let (status, body) = app
            .send(Some(create_reporter_user(owner.id.to_string())), request)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "\"status\" is required");
        assert_eq!(app.store.report_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_non_image_upload() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");

        let request = create_request(
            &[("reportType", "spill"), ("description", "d"), ("status", "open")],
            &[("notes.pdf", "application/pdf", b"%PDF")],
        );
        let (status, _) = app
            .send(Some(create_reporter_user(owner.id.to_string())), request)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.storage.objects().is_empty());
        assert_eq!(app.store.report_count(), 0);
    }

    #[tokio::test]
    async fn test_create_without_identity_is_unauthorized() {
        let app = TestApp::new();
        let request = create_request(
            &[("reportType", "spill"), ("description", "d"), ("status", "open")],
            &[],
        );

        let (status, body) = app.send(None, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");
        assert_eq!(app.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_with_malformed_identity_is_bad_request() {
        let app = TestApp::new();
        let request = create_request(
            &[("reportType", "spill"), ("description", "d"), ("status", "open")],
            &[],
        );

        let (status, body) = app
            .send(Some(create_reporter_user("not-an-id")), request)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid User ID format");
        assert_eq!(app.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_is_not_found() {
        let app = TestApp::new();
        let request = create_request(
            &[("reportType", "spill"), ("description", "d"), ("status", "open")],
            &[("photo.jpg", "image/jpeg", b"jpeg")],
        );

        let (status, body) = app
            .send(
                Some(create_reporter_user(uuid::Uuid::now_v7().to_string())),
                request,
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
        assert!(app.storage.objects().is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                Some(create_reporter_user("anyone")),
                empty_request(Method::GET, "/api/hazard-reports"),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["hazardReports"], json!([]));
    }

    #[tokio::test]
    async fn test_get_by_id_returns_report() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());
        let created = app.create_as(&caller, "spill").await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = app
            .send(
                Some(caller),
                empty_request(Method::GET, &format!("/api/hazard-reports/{}", id)),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hazard Report found");
        assert_eq!(body["hazardreport"], created);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = TestApp::new();
        let caller = create_reporter_user("anyone");
        let uri = format!("/api/hazard-reports/{}", uuid::Uuid::now_v7());

        let (status, body) = app
            .send(Some(caller.clone()), empty_request(Method::GET, &uri))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Hazard Report not found");

        let (status, _) = app
            .send(
                Some(caller.clone()),
                json_request(Method::PUT, &uri, spill_update()),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(Some(caller), empty_request(Method::DELETE, &uri))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let app = TestApp::new();
        let caller = create_reporter_user("anyone");
        let uri = "/api/hazard-reports/12345";

        let requests = vec![
            empty_request(Method::GET, uri),
            json_request(Method::PUT, uri, spill_update()),
            json_request(Method::PATCH, uri, spill_update()),
            empty_request(Method::DELETE, uri),
        ];
        for request in requests {
            let (status, body) = app.send(Some(caller.clone()), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid hazard report ID format");
        }

        assert_eq!(app.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_user_segment_is_not_a_report_id() {
        let app = TestApp::new();
        let caller = create_reporter_user("anyone");
        let uri = "/api/hazard-reports/user";

        let requests = vec![
            json_request(Method::PUT, uri, spill_update()),
            json_request(Method::PATCH, uri, spill_update()),
            empty_request(Method::DELETE, uri),
        ];
        for request in requests {
            let (status, body) = app.send(Some(caller.clone()), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid hazard report ID format");
        }

        let (status, body) = app
            .send(
                Some(caller),
                json_request(Method::PUT, uri, json!({ "status": "closed" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "\"reportType\" is required");

        assert_eq!(app.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_without_multipart_body_is_json_error() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");

        let (status, body) = app
            .send(
                Some(create_reporter_user(owner.id.to_string())),
                json_request(Method::POST, "/api/hazard-reports", spill_update()),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid multipart request"), "{}", message);
        assert_eq!(app.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_images() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());
        let request = create_request(
            &[("reportType", "spill"), ("description", "d"), ("status", "open")],
            &[("photo.webp", "image/webp", b"webp")],
        );
        let (_, created) = app.send(Some(caller.clone()), request).await;
        let created = &created["hazardReport"];
        let uri = format!("/api/hazard-reports/{}", created["id"].as_str().unwrap());

        let (status, body) = app
            .send(
                Some(caller.clone()),
                json_request(Method::PUT, &uri, spill_update()),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hazard Report updated successfully");
        assert_eq!(body["hazardReport"]["status"], "closed");
        assert_eq!(body["hazardReport"]["description"], "mopped up");
        assert_eq!(body["hazardReport"]["images"], created["images"]);

        let mut with_images = spill_update();
        with_images["images"] = json!(["replacement.png"]);
        let (status, body) = app
            .send(Some(caller), json_request(Method::PATCH, &uri, with_images))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hazardReport"]["images"], json!(["replacement.png"]));
    }

    #[tokio::test]
    async fn test_update_missing_field_is_rejected() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());
        let created = app.create_as(&caller, "spill").await;
        let uri = format!("/api/hazard-reports/{}", created["id"].as_str().unwrap());

        let (status, body) = app
            .send(
                Some(caller),
                json_request(Method::PUT, &uri, json!({ "status": "closed" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "\"reportType\" is required");
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let app = TestApp::new();
        let owner = app.store.insert_user("alice");
        let caller = create_reporter_user(owner.id.to_string());
        let created = app.create_as(&caller, "spill").await;
        let uri = format!("/api/hazard-reports/{}", created["id"].as_str().unwrap());

        let (status, body) = app
            .send(Some(caller.clone()), empty_request(Method::DELETE, &uri))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hazard Report deleted successfully");

        let (status, _) = app
            .send(Some(caller.clone()), empty_request(Method::GET, &uri))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app
            .send(Some(caller), empty_request(Method::DELETE, &uri))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Hazard Report not found");
    }

    #[tokio::test]
    async fn test_user_listing_only_contains_own_reports() {
        let app = TestApp::new();
        let alice = create_reporter_user(app.store.insert_user("alice").id.to_string());
        let bob = create_reporter_user(app.store.insert_user("bob").id.to_string());
        app.create_as(&alice, "spill").await;
        app.create_as(&alice, "debris").await;
        app.create_as(&bob, "leak").await;

        let (status, body) = app
            .send(
                Some(alice.clone()),
                empty_request(Method::GET, "/api/hazard-reports/user"),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User Hazard Reports retrieved successfully");
        assert_eq!(body["count"], 2);
        let reports = body["hazardReports"].as_array().unwrap();
        assert!(reports.iter().all(|r| r["user"] == alice.id.as_str()));
    }

    #[tokio::test]
    async fn test_user_listing_requires_identity() {
        let app = TestApp::new();

        let (status, body) = app
            .send(None, empty_request(Method::GET, "/api/hazard-reports/user"))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized: User ID is missing in JWT");

        let (status, body) = app
            .send(
                Some(create_reporter_user("bogus")),
                empty_request(Method::GET, "/api/hazard-reports/user"),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid User ID format");
    }
}
