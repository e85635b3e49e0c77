//! Request-level tests of the ask endpoint: payload handling, error
//! statuses, and the response shapes callers see.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::Router;
use mockito::Matcher;
use serde_json::{json, Value};
use tower::ServiceExt;

use vraagbaak::api;
use vraagbaak::config::{Config, LlmConfig, RetryConfig, SearchConfig};
use vraagbaak::state::AppState;

fn test_config(base_url: &str) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".into(),
        llm: LlmConfig {
            endpoint: base_url.into(),
            api_key: "llm-key".into(),
            api_version: "2024-02-01".into(),
            completion_deployment: "gpt".into(),
            embedding_deployment: "embed".into(),
            max_completion_tokens: 64,
        },
        search: SearchConfig {
            endpoint: base_url.into(),
            api_key: "search-key".into(),
            index_name: "schoolinfo".into(),
        },
        retry: RetryConfig {
            max_attempts: 1,
            initial_delay_secs: 0.01,
            multiplier: 2.0,
        },
        top_k: 3,
        history_cap: 50,
        rewrite_questions: false,
        synthesize_answers: false,
        connect_timeout_secs: 5,
        request_timeout_secs: 5,
    }
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/ask", post(api::ask::ask))
        .with_state(state)
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_body_without_question_key_gets_informational_response() {
    // Dead endpoints: a remote call would fail the request, so a 200
    // proves the pipeline was never invoked.
    let state = AppState::new(test_config("http://127.0.0.1:9")).unwrap();

    let response = app(state.clone())
        .oneshot(ask_request("{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Pass a question"));
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let state = AppState::new(test_config("http://127.0.0.1:9")).unwrap();

    let response = app(state.clone())
        .oneshot(ask_request("{not json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(state.history.is_empty());
}

#[tokio::test]
async fn test_empty_question_is_rejected() {
    let state = AppState::new(test_config("http://127.0.0.1:9")).unwrap();

    let response = app(state)
        .oneshot(ask_request(r#"{"question": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_question_returns_ranked_titles() {
    let mut server = mockito::Server::new_async().await;

    let _embed = server
        .mock("POST", "/openai/deployments/embed/embeddings")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": [{ "embedding": [0.1, 0.2] }] }).to_string())
        .create_async()
        .await;

    let _search = server
        .mock("POST", "/indexes/schoolinfo/docs/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "value": [
                    { "@search.score": 1.8, "title": "Telefoonnummers" },
                    { "@search.score": 1.1, "title": "Contact" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let state = AppState::new(test_config(&server.url())).unwrap();
    let response = app(state)
        .oneshot(ask_request(r#"{"question": "wat is de nummer van school"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["question"], "wat is de nummer van school");
    let results = body["results"].as_array().unwrap();
    assert!(results.len() <= 3);
    assert_eq!(results[0]["title"], "Telefoonnummers");
    assert!(body.get("answer").is_none());
}

#[tokio::test]
async fn test_synthesis_toggle_adds_grounded_answer() {
    let mut server = mockito::Server::new_async().await;

    let _embed = server
        .mock("POST", "/openai/deployments/embed/embeddings")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": [{ "embedding": [0.3, 0.7] }] }).to_string())
        .create_async()
        .await;

    let _search = server
        .mock("POST", "/indexes/schoolinfo/docs/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "value": [{ "@search.score": 1.5, "title": "Telefoonnummers" }] }).to_string(),
        )
        .create_async()
        .await;

    let completion = server
        .mock("POST", "/openai/deployments/gpt/completions")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({ "max_tokens": 64 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "choices": [{ "text": "  Het nummer staat op de contactpagina.\n" }] })
                .to_string(),
        )
        .create_async()
        .await;

    let mut config = test_config(&server.url());
    config.synthesize_answers = true;
    let state = AppState::new(config).unwrap();

    let response = app(state)
        .oneshot(ask_request(r#"{"question": "wat is de nummer van school"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "Het nummer staat op de contactpagina.");

    completion.assert_async().await;
}
