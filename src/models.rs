use serde::{Deserialize, Serialize};

/// Who a conversation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    System,
}

/// A single conversation message. Content is fixed at construction;
/// rewriting a question produces a new message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// One retrieved document, ordered by the index's fused relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(alias = "@search.score", default)]
    pub score: f32,
}

/// Ask request body. A missing `question` key is not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
}

/// Ask response
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}
