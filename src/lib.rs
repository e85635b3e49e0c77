//! # vraagbaak
//!
//! A retrieval-augmented question-answering service: one endpoint accepts a
//! free-text question, optionally rewrites it for spelling and grammar,
//! embeds it, and retrieves the best-matching documents from a remote index
//! with a hybrid (keyword + vector) query.
//!
//! ## Pipeline
//!
//! ```text
//!                ┌──────────────┐
//!                │ Raw question  │
//!                └──────┬────────┘
//!                       │
//!                       ▼
//!            ┌─────────────────────┐
//!            │ Rewrite (optional)  │  completion capability,
//!            │ spelling + grammar  │  retry-wrapped
//!            └──────────┬──────────┘
//!                       │ corrected text
//!                       ▼
//!            ┌─────────────────────┐
//!            │      Embedding      │  embedding capability,
//!            └──────────┬──────────┘  retry-wrapped
//!                       │ vector + text
//!                       ▼
//!            ┌─────────────────────┐
//!            │    Hybrid search    │  index fuses keyword and
//!            │   (top 3, titles)   │  vector relevance
//!            └──────────┬──────────┘
//!                       │ ranked documents
//!                       ▼
//!            ┌─────────────────────┐
//!            │  Answer (optional)  │  grounded synthesis,
//!            └─────────────────────┘  config-gated
//! ```
//!
//! Every outbound call shares one backoff discipline ([`retry`]): waits grow
//! multiplicatively with sub-second jitter, and the final attempt's error
//! propagates unchanged.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration; provider settings are
//!   required and fail startup when absent
//! - [`error`] - Failure taxonomy mapped to response statuses at the boundary
//! - [`models`] - Shared data types: `Message`, `SearchResult`, request/response types
//! - [`retry`] - Exponential-backoff wrapper around outbound calls
//! - [`llm`] - Question rewriting, embeddings, and answer synthesis
//! - [`search`] - Hybrid retrieval against the remote document index
//! - [`pipeline`] - Orchestration and the bounded conversation history
//! - [`api`] - Axum HTTP handler for the ask endpoint
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod retry;
pub mod search;
pub mod state;
