use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::tutor;

/// Full router: probes at the root, tutoring endpoints under `/api`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", tutor::create_tutor_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::retrieval::mock::MockVectorStore;
    use crate::domain::{Board, ContentMetadata, Curriculum, ScoredChunk, VectorStoreRegistry};
    use crate::infrastructure::services::{TutorService, TutorServiceConfig, TutorServiceDeps};

    fn chunk(id: &str, difficulty: f32, content_type: &str) -> ScoredChunk {
        let mut metadata = ContentMetadata::new(9, Board::Cbse, format!("{} body", id));
        metadata.content_id = Some(id.to_string());
        metadata.subtopic = Some("factorization_method".to_string());
        metadata.difficulty_level = Some(difficulty);
        metadata.content_type = Some(content_type.to_string());
        ScoredChunk {
            id: id.to_string(),
            score: 0.8,
            metadata,
        }
    }

    fn embedding(calls: usize) -> MockEmbeddingProvider {
        let mut embedding = MockEmbeddingProvider::new();
        embedding
            .expect_embed()
            .times(calls)
            .returning(|_| Ok(vec![0.5, 0.5]));
        embedding
    }

    struct TestApp {
        router: Router,
        store: Arc<MockVectorStore>,
        llm: Arc<MockLlmProvider>,
    }

    fn app(embedding: MockEmbeddingProvider, store: MockVectorStore, llm: MockLlmProvider) -> TestApp {
        let store = Arc::new(store);
        let llm = Arc::new(llm);
        let deps = TutorServiceDeps {
            curriculum: Arc::new(Curriculum::builtin().unwrap()),
            embedding: Arc::new(embedding),
            llm: llm.clone(),
            stores: VectorStoreRegistry::new().with_store("math_index", store.clone()),
        };
        let state = AppState::new(TutorService::new(deps, TutorServiceConfig::default()));

        TestApp {
            router: create_router(state),
            store,
            llm,
        }
    }

    async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_chat_answers_with_metadata() {
        let t = app(
            embedding(1),
            MockVectorStore::new().with_response(vec![chunk("qe-1", 2.0, "worked_example")]),
            MockLlmProvider::new("mock").with_text("Split 5x into 2x + 3x."),
        );

        let (status, body) = post(
            t.router,
            "/api/chat",
            json!({
                "message": "How do I factorize x^2 + 5x + 6?",
                "topic": "quadratic_equations",
                "board": "CBSE",
                "grade": 9,
                "subtopic": "factorization_method"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Split 5x into 2x + 3x.");
        assert_eq!(body["grade_appropriate"], true);
        assert_eq!(body["state"], "ANSWERED");
        assert_eq!(body["results_count"], 1);
        assert_eq!(body["relaxed_filter_used"], false);
        assert_eq!(body["content_metadata"][0]["content_id"], "qe-1");
        assert!(body.get("grade_message").is_none());
        assert_eq!(t.store.search_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_blocked_below_min_grade() {
        let t = app(embedding(0), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let (status, body) = post(
            t.router,
            "/api/chat",
            json!({"message": "What is the discriminant?", "topic": "quadratic_equations", "board": "CBSE", "grade": 5}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grade_appropriate"], false);
        assert_eq!(body["recommended_grade"], 8);
        assert_eq!(body["current_grade"], 5);
        assert!(body["answer"].as_str().unwrap().contains("grade 8"));
        assert_eq!(t.store.search_count(), 0);
        assert_eq!(t.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_double_empty_returns_suggestions() {
        let t = app(embedding(1), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let (status, body) = post(
            t.router,
            "/api/chat",
            json!({
                "message": "Show me factorization",
                "topic": "quadratic_equations",
                "board": "CBSE",
                "grade": 9,
                "subtopic": "factorization_method"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "NO_RESULTS");
        assert!(!body["answer"].as_str().unwrap().is_empty());
        assert!(!body["suggestions"].as_array().unwrap().is_empty());
        assert!(body.get("content_metadata").is_none());
        assert_eq!(t.store.search_count(), 2);
        assert_eq!(t.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_missing_fields() {
        let t = app(embedding(0), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let (status, body) = post(t.router, "/api/chat", json!({"topic": "quadratic_equations"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing required fields: message, board, grade");
        assert_eq!(body["error"]["missing_fields"], json!(["message", "board", "grade"]));
    }

    #[tokio::test]
    async fn test_chat_llm_failure_is_500() {
        let t = app(
            embedding(1),
            MockVectorStore::new().with_response(vec![chunk("qe-1", 2.0, "worked_example")]),
            MockLlmProvider::new("mock").with_error("upstream exploded"),
        );

        let (status, body) = post(
            t.router,
            "/api/chat",
            json!({"message": "Explain roots", "topic": "quadratic_equations", "board": "CBSE", "grade": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["type"], "server_error");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Internal server error: "));
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_error() {
        let t = app(embedding(0), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = t.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_lesson_adds_chapter_and_subject() {
        let t = app(
            embedding(1),
            MockVectorStore::new().with_response(vec![chunk("qe-1", 2.0, "concept")]),
            MockLlmProvider::new("mock").with_text("Today we study quadratics."),
        );

        let (status, body) = post(
            t.router,
            "/api/lesson",
            json!({"topic": "quadratic_equations", "board": "ICSE", "grade": 10}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chapter"], "Polynomials");
        assert_eq!(body["subject"], "Mathematics");

        let (_, request) = &t.llm.requests()[0];
        let user_turn = request.messages.last().unwrap().content_text();
        assert!(user_turn.contains("Provide a comprehensive lesson on quadratic equations for grade 10 ICSE board students"));
    }

    #[tokio::test]
    async fn test_adaptive_content_sorted_by_difficulty() {
        let t = app(
            embedding(1),
            MockVectorStore::new().with_response(vec![
                chunk("hard", 4.6, "challenge"),
                chunk("easy", 1.3, "practice"),
                chunk("mid", 3.3, "practice"),
            ]),
            MockLlmProvider::new("mock"),
        );

        let (status, body) = post(
            t.router,
            "/api/adaptive-content",
            json!({"topic": "quadratic_equations"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["adaptive_content"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["easy", "mid", "hard"]);
        assert_eq!(body["content_types"], json!(["practice", "challenge"]));
        assert_eq!(body["adaptive_content"][0]["board"], "CBSE");
        assert_eq!(t.store.queries()[0].top_k, 10);
    }

    #[tokio::test]
    async fn test_learning_path() {
        let t = app(embedding(0), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let (status, body) = post(
            t.router.clone(),
            "/api/learning-path",
            json!({
                "topic": "quadratic_equations",
                "board": "CBSE",
                "grade": 10,
                "current_subtopic": "factorization_method",
                "mastery_level": 0.8
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["next_steps"][0]["focus"], "introduction");

        let (status, body) = post(
            t.router.clone(),
            "/api/learning-path",
            json!({"topic": "quadratic_equations", "board": "CBSE", "grade": 6}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grade_appropriate"], false);

        let (status, _) = post(
            t.router,
            "/api/learning-path",
            json!({"topic": "trigonometry", "board": "CBSE"}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_topics_and_probes() {
        let t = app(embedding(0), MockVectorStore::new(), MockLlmProvider::new("mock"));

        let response = t
            .router
            .clone()
            .oneshot(Request::builder().uri("/api/topics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let topics: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(topics["quadratic_equations"]["index"], "math_index");
        assert_eq!(topics["digestive_system"]["boards"], json!(["CBSE", "ICSE", "SSC"]));

        let response = t
            .router
            .clone()
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let response = t
            .router
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
