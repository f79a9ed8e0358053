//! HTTP endpoint tests using axum-test, backed by the core crate's fixture artifacts

#[cfg(test)]
mod http_endpoint_tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use fakecheck_core::{
        ArtifactPaths, Ensemble, Interpretation, Lemmatizer, LinearSvc, MorphAnalyzer,
        NaiveBayes, Pipeline, RandomForest, StopWords, TfidfVectorizer,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::state::AppState;

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../crates/fakecheck-core/tests/fixtures")
    }

    fn create_test_server_with_timeout(timeout_ms: u64) -> TestServer {
        let state = AppState::load(&fixtures_dir(), timeout_ms).unwrap();
        TestServer::new(crate::router(state)).unwrap()
    }

    fn create_test_server() -> TestServer {
        create_test_server_with_timeout(10_000)
    }

    /// Analyzer that has no reading for anything
    struct Silent;

    impl MorphAnalyzer for Silent {
        fn analyse(&self, _form: &str) -> Vec<Interpretation> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "silent"
        }
    }

    fn create_silent_server() -> TestServer {
        let paths = ArtifactPaths::in_dir(fixtures_dir());
        let ensemble = Ensemble::new(
            Box::new(NaiveBayes::load(&paths.naive_bayes).unwrap()),
            Box::new(LinearSvc::load(&paths.linear_svc).unwrap()),
            Box::new(RandomForest::load(&paths.random_forest).unwrap()),
        )
        .unwrap();
        let pipeline = Pipeline::from_parts(
            StopWords::load(&paths.stop_words).unwrap(),
            Lemmatizer::new(Arc::new(Silent)),
            TfidfVectorizer::load(&paths.vectorizer).unwrap(),
            ensemble,
        )
        .unwrap();
        TestServer::new(crate::router(AppState::new(pipeline, 10_000))).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "fakecheck-api");
        assert_eq!(body["vocabulary_size"], 6);
    }

    #[tokio::test]
    async fn test_verify_reference_article_is_fake() {
        let server = create_test_server();
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": "To JEST    fałszywa!!! wiadomość.\n" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "success": true,
                "pending": false,
                "verdict": "To prawdopodobnie fałszywa informacja",
                "naive_bayes": "False",
                "linear_svc": "False",
                "random_forest": "False",
                "lemma_count": 2,
                "empty_input": false
            })
        );
    }

    #[tokio::test]
    async fn test_verify_true_article() {
        let server = create_test_server();
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": "Rząd ogłosił prawdę." }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["verdict"], "To prawdopodobnie prawdziwa informacja");
        assert_eq!(body["lemma_count"], 3);
    }

    #[tokio::test]
    async fn test_single_true_vote_is_still_fake() {
        let server = create_test_server();
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": "wiadomości" }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["random_forest"], "True");
        assert_eq!(body["verdict"], "To prawdopodobnie fałszywa informacja");
    }

    #[tokio::test]
    async fn test_verify_without_text_is_pending() {
        let server = create_test_server();

        for request in [json!({}), json!({ "text": null })] {
            let response = server.post("/api/verify").json(&request).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["pending"], true);
            assert_eq!(body["verdict"], "?");
            assert_eq!(body["naive_bayes"], "?");
            assert_eq!(body["linear_svc"], "?");
            assert_eq!(body["random_forest"], "?");
        }
    }

    #[tokio::test]
    async fn test_verify_empty_text_is_classified() {
        let server = create_test_server();
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": "" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["pending"], false);
        assert_eq!(body["empty_input"], true);
        assert_eq!(body["lemma_count"], 0);
        assert_ne!(body["verdict"], "?");
    }

    #[tokio::test]
    async fn test_pending_endpoint() {
        let server = create_test_server();
        let response = server.get("/api/verdict/pending").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["verdict"], "?");
        assert_eq!(body["pending"], true);
    }

    #[tokio::test]
    async fn test_uninterpretable_token_returns_422() {
        let server = create_silent_server();
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": "fałszywa wiadomość" }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "LEMMATIZATION_FAILED");
        assert!(body["error"].as_str().unwrap().contains("'fałszywa'"));
    }

    #[tokio::test]
    async fn test_timeout_returns_408() {
        let server = create_test_server_with_timeout(0);
        // Stays under the default 2 MB body limit
        let text = "fałszywa wiadomość ".repeat(80_000);
        let response = server
            .post("/api/verify")
            .json(&json!({ "text": text }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        let body: Value = response.json();
        assert_eq!(body["code"], "TIMEOUT");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let server = create_test_server();
        let response = server
            .post("/api/verify")
            .text("not json")
            .expect_failure()
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[test]
    fn test_missing_artifact_dir_fails_startup() {
        let err = AppState::load(Path::new("/nonexistent/fakecheck-artifacts"), 1_000)
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("failed to load artifacts"));
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::api::VerifyRequest;

    proptest! {
        /// Property: any JSON string is accepted as the text field
        #[test]
        fn any_text_deserializes(text in ".{0,200}") {
            let body = serde_json::json!({ "text": text.clone() });
            let request: VerifyRequest = serde_json::from_value(body).unwrap();
            prop_assert_eq!(request.text, Some(text));
        }
    }
}
