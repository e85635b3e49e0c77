//! Question pipeline: validation → optional rewrite → embedding → retrieval.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Error;
use crate::llm::{embeddings, normalize};
use crate::models::{Message, SearchResult};
use crate::search::hybrid;
use crate::state::AppState;

/// Bounded, append-only record of the questions asked this process.
///
/// Appends take a write lock, so entries from concurrent requests never
/// tear or drop; once at capacity the oldest message is evicted first.
#[derive(Clone)]
pub struct ConversationHistory {
    capacity: usize,
    messages: Arc<RwLock<VecDeque<Message>>>,
}

impl ConversationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            messages: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    pub fn push(&self, message: Message) {
        let mut messages = self.messages.write();
        if messages.len() == self.capacity {
            messages.pop_front();
        }
        messages.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().iter().cloned().collect()
    }
}

/// Answer a raw question with the top-ranked documents from the index.
///
/// Steps: validate the question is non-empty; optionally rewrite it for
/// spelling and grammar; record it as a user message; embed the message
/// content; hybrid-search the index with both the text and the vector.
/// Everything except the history append is stateless between invocations.
pub async fn answer_question(
    state: &AppState,
    raw_question: &str,
) -> Result<Vec<SearchResult>, Error> {
    let question = raw_question.trim();
    if question.is_empty() {
        return Err(Error::Input("question must not be empty".to_string()));
    }

    let content = if state.config.rewrite_questions {
        normalize::rewrite_question(&state.http_client, &state.config.llm, &state.retry, question)
            .await?
    } else {
        question.to_string()
    };

    let message = Message::user(content);
    state.history.push(message.clone());

    let vector = embeddings::embed_single(
        &state.http_client,
        &state.config.llm,
        &state.retry,
        &message.content,
    )
    .await?;

    hybrid::hybrid_search(
        &state.http_client,
        &state.config.search,
        &state.retry,
        &message.content,
        &vector,
        state.config.top_k,
    )
    .await
}
