pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::courses::handlers::handle_predict_courses;
use crate::errors::AppError;
use crate::interview::handlers::{handle_evaluate_answers, handle_generate_questions};
use crate::jobs::handlers::handle_fetch_jobs;
use crate::resume::handlers::handle_match_score;
use crate::state::AppState;

/// Resume uploads above this size are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ENDPOINTS: &[&str] = &[
    "/api/fetch_jobs",
    "/api/match_score",
    "/api/predict_courses",
    "/api/generate_interview_questions",
    "/api/evaluate_answers",
];

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/fetch_jobs", get(handle_fetch_jobs))
        .route(
            "/api/match_score",
            post(handle_match_score).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/predict_courses", post(handle_predict_courses))
        .route(
            "/api/generate_interview_questions",
            post(handle_generate_questions),
        )
        .route("/api/evaluate_answers", post(handle_evaluate_answers))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::courses::recommender::test_support::sample_index;
    use crate::interview::coach::MockCoach;
    use crate::jobs::adzuna::{AdzunaClient, Credentials};
    use crate::matching::embedding::test_support::letter_provider;
    use crate::matching::embedding::EmbeddingProvider;

    fn test_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn ready_state() -> AppState {
        let config = test_config();
        AppState {
            jobs: AdzunaClient::new(&config.adzuna_base_url, None).unwrap(),
            config,
            embedder: letter_provider(),
            courses: Some(Arc::new(sample_index())),
            coach: Arc::new(MockCoach),
        }
    }

    fn unready_state() -> AppState {
        AppState {
            embedder: EmbeddingProvider::unavailable(),
            courses: None,
            ..ready_state()
        }
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "portal-test-boundary";

    fn multipart_request(fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, data) in fields {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice("\r\n".as_bytes());
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/match_score")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let (status, body) = send(ready_state(), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available_endpoints"].as_array().unwrap().len(), ENDPOINTS.len());
    }

    #[tokio::test]
    async fn test_health_reports_component_readiness() {
        let (status, body) = send(ready_state(), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["components"]["embedding_model"]["ready"], true);
        assert_eq!(body["components"]["embedding_model"]["model"], "letter-count");
        assert_eq!(body["components"]["course_index"]["courses"], 3);
        assert_eq!(body["components"]["job_search"]["configured"], false);
        assert_eq!(body["components"]["interview_coach"], "mock");

        let (_, body) = send(unready_state(), get_request("/health")).await;
        assert_eq!(body["components"]["embedding_model"]["ready"], false);
        assert_eq!(body["components"]["course_index"]["ready"], false);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = send(ready_state(), get_request("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    // ── match_score ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_match_score_unready_model_is_503() {
        let request = multipart_request(&[("job_description_text", None, "Rust developer".as_bytes())]);
        let (status, body) = send(unready_state(), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["message"], "Scoring engine unavailable.");
    }

    #[tokio::test]
    async fn test_match_score_requires_resume_file() {
        let request = multipart_request(&[("job_description_text", None, "Rust developer".as_bytes())]);
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No resume file uploaded.");
    }

    #[tokio::test]
    async fn test_match_score_requires_job_description() {
        let request = multipart_request(&[("resume_file", Some("cv.pdf"), "%PDF-1.4".as_bytes())]);
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Job description text missing.");
    }

    #[tokio::test]
    async fn test_match_score_without_multipart_body_uses_error_envelope() {
        let request = json_request("/api/match_score", json!({"job_description_text": "Rust"}));
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_match_score_unreadable_pdf_is_500() {
        let request = multipart_request(&[
            ("resume_file", Some("cv.pdf"), "not a pdf at all".as_bytes()),
            ("job_description_text", None, "Rust developer".as_bytes()),
        ]);
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");
    }

    // ── predict_courses ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_predict_courses_ranks_catalog() {
        let request = json_request(
            "/api/predict_courses",
            json!({"job_title": "Rust Engineer", "job_description": "Concurrency and memory safety", "top_n": 5}),
        );
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        let courses = body["courses"].as_array().unwrap();
        assert!(!courses.is_empty());
        assert_eq!(courses[0]["id"], "course_1");
        assert_eq!(courses[0]["name"], "Rust Systems Programming");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_predict_courses_rejects_empty_query_fields() {
        let request = json_request("/api/predict_courses", json!({"job_title": "", "top_n": 5}));
        let (status, _) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = json_request("/api/predict_courses", json!({"job_title": 17}));
        let (status, _) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_courses_punctuation_only_returns_message() {
        let request = json_request("/api/predict_courses", json!({"job_title": "?!", "job_description": "..."}));
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["courses"].as_array().unwrap().is_empty());
        assert_eq!(body["message"], "Query text is empty after cleaning.");
    }

    #[tokio::test]
    async fn test_predict_courses_negative_top_n_is_empty() {
        let request = json_request(
            "/api/predict_courses",
            json!({"job_title": "Rust Engineer", "top_n": -3}),
        );
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["courses"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_predict_courses_without_index_is_503() {
        let request = json_request("/api/predict_courses", json!({"job_title": "Rust Engineer"}));
        let (status, body) = send(unready_state(), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_predict_courses_accepts_numeric_string_top_n() {
        let request = json_request(
            "/api/predict_courses",
            json!({"job_title": "python rust kubernetes", "top_n": "2"}),
        );
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_predict_courses_non_numeric_top_n_is_validation_error() {
        let request = json_request(
            "/api/predict_courses",
            json!({"job_title": "Rust Engineer", "top_n": "many"}),
        );
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        for uri in [
            "/api/predict_courses",
            "/api/generate_interview_questions",
            "/api/evaluate_answers",
        ] {
            let request = Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from("{job_title: oops"))
                .unwrap();
            let (status, body) = send(ready_state(), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
            assert!(body["error"]["message"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_missing_json_content_type_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/predict_courses")
            .body(Body::from(json!({"job_title": "SRE"}).to_string()))
            .unwrap();
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    // ── fetch_jobs ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_jobs_without_credentials_is_500() {
        let (status, body) = send(ready_state(), get_request("/api/fetch_jobs")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_fetch_jobs_proxies_adzuna() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/in/search/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "results": [
                    {"id": "1", "title": "Rust Engineer", "company": {"display_name": "Acme"}},
                    {"id": "2", "title": "Go Engineer", "category": {"label": "IT Jobs"}}
                ]
            })))
            .mount(&server)
            .await;

        let state = AppState {
            jobs: AdzunaClient::new(
                &server.uri(),
                Some(Credentials {
                    app_id: "id".to_string(),
                    app_key: "key".to_string(),
                }),
            )
            .unwrap(),
            ..ready_state()
        };

        let (status, body) = send(state, get_request("/api/fetch_jobs?page=2&keywords=rust")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["country"], "in");
        assert_eq!(body["total_results"], 2);
        assert_eq!(body["jobs"][0]["company"], "Acme");
        assert_eq!(body["jobs"][1]["category"], "IT Jobs");
    }

    #[tokio::test]
    async fn test_fetch_jobs_non_numeric_page_falls_back_to_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/in/search/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let state = AppState {
            jobs: AdzunaClient::new(
                &server.uri(),
                Some(Credentials {
                    app_id: "id".to_string(),
                    app_key: "key".to_string(),
                }),
            )
            .unwrap(),
            ..ready_state()
        };

        let (status, body) = send(state, get_request("/api/fetch_jobs?page=abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_results"], 0);
        assert!(body["jobs"].as_array().unwrap().is_empty());
    }

    // ── interview ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_questions_requires_role() {
        let request = json_request("/api/generate_interview_questions", json!({"context_keywords": "rust"}));
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Job role is a required field.");
    }

    #[tokio::test]
    async fn test_generate_questions_uses_default_counts() {
        let request = json_request("/api/generate_interview_questions", json!({"job_role": "SRE"}));
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"]["technical_questions"].as_array().unwrap().len(), 3);
        assert_eq!(body["questions"]["behavioral_questions"].as_array().unwrap().len(), 2);
        assert_eq!(body["questions"]["situational_questions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_evaluate_answers_requires_both_sections() {
        let request = json_request("/api/evaluate_answers", json!({"job_details": {"title": "SRE"}}));
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Missing required job_details or questions_and_answers."
        );
    }

    #[tokio::test]
    async fn test_evaluate_answers_reports_average_and_details() {
        let request = json_request(
            "/api/evaluate_answers",
            json!({
                "job_details": {"title": "SRE", "description": "Keep things up."},
                "questions_and_answers": [
                    {"id": 1, "question": "What is an SLO?", "answer": "A reliability target agreed with users."},
                    {"id": 2, "question": "Tell me about an outage.", "answer": ""}
                ]
            }),
        );
        let (status, body) = send(ready_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        let details = body["detailed_feedback"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[1]["score"], 0);
        assert_eq!(details[1]["question_id"], 2);
        assert_eq!(body["score"], details[0]["score"].as_f64().unwrap());
        assert!(body["feedback"]
            .as_str()
            .unwrap()
            .starts_with("Your overall average score is"));
    }
}
