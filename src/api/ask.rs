use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::llm::answer;
use crate::models::{AskRequest, AskResponse};
use crate::pipeline;
use crate::state::AppState;

/// Returned when the request body carries no question at all.
const NO_QUESTION_MESSAGE: &str =
    "Pass a question in the request body to search the knowledge base.";

/// POST /api/ask - Single question-answering endpoint:
///   1. Optional spelling/grammar rewrite of the question
///   2. Embedding of the (corrected) question
///   3. Hybrid keyword + vector retrieval, top 3
///   4. Optional grounded answer synthesis from the retrieved documents
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Response, (StatusCode, String)> {
    let Some(question) = req.question else {
        // No question is not an error, there is just nothing to retrieve.
        return Ok(Json(serde_json::json!({ "message": NO_QUESTION_MESSAGE })).into_response());
    };

    let results = pipeline::answer_question(&state, &question)
        .await
        .map_err(|e| {
            tracing::error!("question pipeline failed: {e}");
            (e.status(), e.to_string())
        })?;

    let answer = if state.config.synthesize_answers && !results.is_empty() {
        let text = answer::synthesize_answer(
            &state.http_client,
            &state.config.llm,
            &state.retry,
            question.trim(),
            &results,
        )
        .await
        .map_err(|e| {
            tracing::error!("answer synthesis failed: {e}");
            (e.status(), e.to_string())
        })?;
        Some(text)
    } else {
        None
    };

    Ok(Json(AskResponse {
        question: question.trim().to_string(),
        results,
        answer,
    })
    .into_response())
}
