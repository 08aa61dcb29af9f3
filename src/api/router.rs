//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server: every endpoint lives under `/api/`, and uploaded protocol
//! attachments are served statically under `/uploads/`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Body limit sized for a 50 MB attachment plus multipart overhead.
const BODY_LIMIT_BYTES: usize = 55 * 1024 * 1024;

/// Build the API router.
///
/// NOTE: path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    let uploads_dir = ctx.uploads_dir.as_path().to_path_buf();

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/protocols",
            get(endpoints::protocols::list).post(endpoints::protocols::create),
        )
        .route(
            "/protocols/:id",
            get(endpoints::protocols::detail)
                .put(endpoints::protocols::update)
                .delete(endpoints::protocols::remove),
        )
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::create),
        )
        .route("/medications/:id", get(endpoints::medications::detail))
        .route(
            "/calculators",
            get(endpoints::calculators::kinds).post(endpoints::calculators::compute),
        )
        .route(
            "/calculator-results",
            get(endpoints::calculators::results).post(endpoints::calculators::save_result),
        )
        .route("/interactions", get(endpoints::reference::interactions))
        .route("/interactions/check", post(endpoints::reference::check))
        .route("/reference/tanks", get(endpoints::reference::tanks))
        .route("/learning-modules", get(endpoints::learning::list_modules))
        .route(
            "/learning-modules/:id",
            get(endpoints::learning::module_detail),
        )
        .route("/learning-paths", get(endpoints::learning::paths))
        .route(
            "/learning-paths/progress",
            post(endpoints::learning::progress),
        )
        .route(
            "/study-notes",
            get(endpoints::study_notes::list).post(endpoints::study_notes::create),
        )
        .route(
            "/study-notes/:id",
            get(endpoints::study_notes::detail)
                .put(endpoints::study_notes::update)
                .delete(endpoints::study_notes::remove),
        )
        .route(
            "/flashcards",
            get(endpoints::flashcards::list).post(endpoints::flashcards::create),
        )
        .route(
            "/flashcards/:id",
            get(endpoints::flashcards::detail)
                .put(endpoints::flashcards::update)
                .delete(endpoints::flashcards::remove),
        )
        .route(
            "/nremt-questions",
            get(endpoints::questions::list).post(endpoints::questions::create),
        )
        .route(
            "/nremt-questions/:scope",
            get(endpoints::questions::list_by_scope),
        )
        .route(
            "/nremt-sessions",
            get(endpoints::questions::list_sessions).post(endpoints::questions::create_session),
        )
        .route("/exams", post(endpoints::exams::create))
        .route(
            "/exams/:id",
            get(endpoints::exams::detail).delete(endpoints::exams::remove),
        )
        .route("/exams/:id/answer", post(endpoints::exams::answer))
        .route("/exams/:id/next", post(endpoints::exams::next))
        .route("/exams/:id/previous", post(endpoints::exams::previous))
        .route("/exams/:id/reset", post(endpoints::exams::reset))
        .route("/dashboard/stats", get(endpoints::dashboard::stats))
        .route("/seed", post(endpoints::seed::run))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    /// Router plus the tempdir guard backing its database and uploads.
    /// The guard must be kept alive for the duration of the test.
    fn test_app() -> (Router, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(tmp.path().join("test.db"), tmp.path().join("uploads"));
        (api_router(ctx), tmp)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn sample_medication() -> serde_json::Value {
        json!({
            "name": "Aspirin",
            "scope": "EMT",
            "category": "antiplatelet",
            "indications": ["Suspected acute coronary syndrome"],
            "adult_dose": "324 mg PO",
            "route": "PO"
        })
    }

    fn sample_question(scope: &str, text: &str) -> serde_json::Value {
        json!({
            "scope": scope,
            "content_area": "Cardiology & Resuscitation",
            "question_type": "multiple-choice",
            "question_text": text,
            "options": ["A", "B", "C"],
            "correct_answer": "A",
            "explanation": "A is right."
        })
    }

    #[tokio::test]
    async fn health_response_shape() {
        let (app, _tmp) = test_app();

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (app, _tmp) = test_app();

        let response = app.oneshot(get_request("/api/nonexistent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn medication_round_trip() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/medications", sample_medication()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = response_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["name"], "Aspirin");

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/medications/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/api/medications?scope=EMT"))
            .await
            .unwrap();
        let list = response_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let response = app
            .oneshot(get_request("/api/medications?scope=Paramedic"))
            .await
            .unwrap();
        let list = response_json(response).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_scope_reports_field_error() {
        let (app, _tmp) = test_app();

        let mut input = sample_medication();
        input["scope"] = json!("EMT-B");
        let response = app
            .oneshot(json_request("POST", "/api/medications", input))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["errors"][0]["field"], "scope");
    }

    #[tokio::test]
    async fn missing_medication_is_404_with_message() {
        let (app, _tmp) = test_app();

        let response = app
            .oneshot(get_request("/api/medications/999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = response_json(response).await;
        assert_eq!(json["message"], "Medication not found");
    }

    #[tokio::test]
    async fn protocol_upload_round_trip() {
        let (app, _tmp) = test_app();

        let boundary = "xBOUNDARYx";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"name\"\r\n\r\n\
             Adult Cardiac Arrest\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"category\"\r\n\r\n\
             cardiac\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"scope\"\r\n\r\n\
             Paramedic\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"acls 2025.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 test\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/protocols")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = response_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["scope"], "Paramedic");
        assert_eq!(created["file_type"], "pdf");

        let file_path = created["file_path"].as_str().unwrap().to_string();
        assert!(file_path.starts_with("/uploads/"));
        assert!(file_path.ends_with(".pdf"));
        assert!(!file_path.contains(' '));

        // the stored attachment is served back verbatim
        let response = app.clone().oneshot(get_request(&file_path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 test");

        let response = app
            .clone()
            .oneshot(delete_request(&format!("/api/protocols/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request(&format!("/api/protocols/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn protocol_requires_name_and_category() {
        let (app, _tmp) = test_app();

        let boundary = "xBOUNDARYx";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"content\"\r\n\r\n\
             Steps only.\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/protocols")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        let fields: Vec<&str> = json["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "category"]);
    }

    #[tokio::test]
    async fn protocol_update_is_partial() {
        let (app, _tmp) = test_app();

        let boundary = "xBOUNDARYx";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"name\"\r\n\r\n\
             Burn Care\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"category\"\r\n\r\n\
             trauma\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/protocols")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = response_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/protocols/{id}"),
                json!({"description": "Rule of nines reference."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = response_json(response).await;
        assert_eq!(updated["name"], "Burn Care");
        assert_eq!(updated["description"], "Rule of nines reference.");
    }

    #[tokio::test]
    async fn calculator_listing_and_compute() {
        let (app, _tmp) = test_app();

        let response = app.clone().oneshot(get_request("/api/calculators")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let kinds = response_json(response).await;
        assert_eq!(kinds.as_array().unwrap().len(), 12);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/calculators",
                json!({"calculator": "shock_index", "heart_rate": 110.0, "systolic_bp": 100.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let result = response_json(response).await;
        assert_eq!(result["calculator"], "shock_index");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/calculators",
                json!({"calculator": "tricorder"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn calculator_results_are_saved_and_listed() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/calculator-results",
                json!({
                    "user_id": 1,
                    "calculator_type": "bmi",
                    "inputs": {"weight": 70.0, "height_cm": 175.0},
                    "result": {"bmi": 22.9}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get_request("/api/calculator-results?user_id=1"))
            .await
            .unwrap();
        let list = response_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["calculator_type"], "bmi");
    }

    #[tokio::test]
    async fn interaction_table_and_check() {
        let (app, _tmp) = test_app();

        let response = app.clone().oneshot(get_request("/api/interactions")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let table = response_json(response).await;
        assert!(!table.as_array().unwrap().is_empty());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/interactions/check",
                json!({"medications": ["Aspirin", "Warfarin", "Oxygen"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["interactions"][0]["severity"], "major");
    }

    #[tokio::test]
    async fn oxygen_tanks_are_listed() {
        let (app, _tmp) = test_app();

        let response = app.oneshot(get_request("/api/reference/tanks")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let tanks = response_json(response).await;
        assert!(tanks.as_array().unwrap().len() >= 6);
        assert_eq!(tanks[0]["size"], "D");
    }

    #[tokio::test]
    async fn study_note_crud() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/study-notes",
                json!({
                    "chapter_number": 13,
                    "title": "Shock",
                    "content": "Perfusion failure review.",
                    "key_points": ["Compensated first"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = response_json(response).await["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/study-notes/{id}"),
                json!({"is_completed": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await["is_completed"], true);

        let response = app
            .clone()
            .oneshot(get_request("/api/study-notes?chapter_number=13"))
            .await
            .unwrap();
        assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(delete_request(&format!("/api/study-notes/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request(&format!("/api/study-notes/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn flashcard_review_stats_update() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/flashcards",
                json!({
                    "chapter_number": 12,
                    "question": "Albuterol class?",
                    "answer": "Beta-2 agonist bronchodilator."
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = response_json(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["times_correct"], 0);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/flashcards/{id}"),
                json!({"times_correct": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await["times_correct"], 1);

        let response = app
            .oneshot(get_request("/api/flashcards?chapter=12"))
            .await
            .unwrap();
        assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn questions_listed_by_scope_path() {
        let (app, _tmp) = test_app();

        for (scope, text) in [("EMT", "EMT question?"), ("Paramedic", "Medic question?")] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/nremt-questions",
                    sample_question(scope, text),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/nremt-questions/EMT"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list = response_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["scope"], "EMT");

        let response = app
            .clone()
            .oneshot(get_request("/api/nremt-questions?scope=Paramedic"))
            .await
            .unwrap();
        assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);

        // scope labels are exact; lowercase is rejected, not empty
        let response = app
            .oneshot(get_request("/api/nremt-questions/emt"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn exam_flow_completes_and_records_summary() {
        let (app, _tmp) = test_app();

        for text in ["First?", "Second?"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/nremt-questions",
                    sample_question("EMR", text),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/exams", json!({"scope": "EMR"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let view = response_json(response).await;
        let exam_id = view["id"].as_str().unwrap().to_string();
        assert_eq!(view["phase"], "in_progress");
        assert_eq!(view["total_questions"], 2);
        // unanswered questions never reveal the key
        assert!(view["current_question"]["correct_answer"].is_null());

        let mut last_view = view;
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    &format!("/api/exams/{exam_id}/answer"),
                    json!({"answer": "A"}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let view = response_json(response).await;
            assert_eq!(view["current_question"]["correct_answer"], "A");

            let response = app
                .clone()
                .oneshot(post_request(&format!("/api/exams/{exam_id}/next")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            last_view = response_json(response).await;
        }

        assert_eq!(last_view["phase"], "complete");
        assert_eq!(last_view["score"], 2);
        assert_eq!(last_view["is_passed"], true);

        // completion recorded a summary row
        let response = app
            .clone()
            .oneshot(get_request("/api/nremt-sessions"))
            .await
            .unwrap();
        let sessions = response_json(response).await;
        assert_eq!(sessions.as_array().unwrap().len(), 1);
        assert_eq!(sessions[0]["scope"], "EMR");
        assert_eq!(sessions[0]["correct_answers"], 2);
        assert_eq!(sessions[0]["is_passed"], true);

        let response = app
            .clone()
            .oneshot(delete_request(&format!("/api/exams/{exam_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request(&format!("/api/exams/{exam_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn exam_transitions_out_of_order_are_400() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/nremt-questions",
                sample_question("AEMT", "Only question?"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/exams", json!({"scope": "AEMT"})))
            .await
            .unwrap();
        let exam_id = response_json(response).await["id"]
            .as_str()
            .unwrap()
            .to_string();

        // advancing an unanswered question
        let response = app
            .clone()
            .oneshot(post_request(&format!("/api/exams/{exam_id}/next")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("not been answered"));

        // stepping back from the first question
        let response = app
            .clone()
            .oneshot(post_request(&format!("/api/exams/{exam_id}/previous")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // double answer
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/exams/{exam_id}/answer"),
                json!({"answer": "A"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/exams/{exam_id}/answer"),
                json!({"answer": "B"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn exam_needs_a_question_pool() {
        let (app, _tmp) = test_app();

        let response = app
            .oneshot(json_request("POST", "/api/exams", json!({"scope": "AEMT"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("No questions available"));
    }

    #[tokio::test]
    async fn dashboard_requires_user_id() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/dashboard/stats"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["errors"][0]["field"], "user_id");

        let response = app
            .oneshot(get_request("/api/dashboard/stats?user_id=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats = response_json(response).await;
        assert_eq!(stats["calculators"], 12);
        assert_eq!(stats["my_protocols"], 0);
    }

    #[tokio::test]
    async fn seed_endpoint_rebuilds_catalog() {
        let (app, _tmp) = test_app();

        let response = app.clone().oneshot(post_request("/api/seed")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let report = response_json(response).await;
        assert!(report["medications"].as_u64().unwrap() > 0);
        assert!(report["questions"].as_u64().unwrap() > 0);

        let response = app
            .clone()
            .oneshot(get_request("/api/medications"))
            .await
            .unwrap();
        let list = response_json(response).await;
        assert_eq!(
            list.as_array().unwrap().len() as u64,
            report["medications"].as_u64().unwrap()
        );

        // reseeding replaces rather than duplicates
        let response = app.clone().oneshot(post_request("/api/seed")).await.unwrap();
        let second = response_json(response).await;
        assert_eq!(second["medications"], report["medications"]);

        let response = app
            .oneshot(get_request("/api/learning-modules?module_number=1"))
            .await
            .unwrap();
        assert_eq!(response_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn learning_paths_and_progress() {
        let (app, _tmp) = test_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/learning-paths"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["paths"].as_array().unwrap().len(), 5);
        assert!(!json["achievements"].as_array().unwrap().is_empty());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/learning-paths/progress",
                json!({"completed_modules": ["respiratory-anatomy"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert!(json["total_earned_points"].as_u64().unwrap() > 0);

        let airway = json["paths"]
            .as_array()
            .unwrap()
            .iter()
            .find(|path| path["id"] == "airway-mastery")
            .unwrap();
        assert_eq!(airway["progress"], 25.0);
    }

    #[tokio::test]
    async fn missing_learning_module_is_404() {
        let (app, _tmp) = test_app();

        let response = app
            .oneshot(get_request("/api/learning-modules/999"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = response_json(response).await;
        assert_eq!(json["message"], "Learning module not found");
    }
}
