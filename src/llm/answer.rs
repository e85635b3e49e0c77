//! Grounded answer synthesis from retrieved documents.
//!
//! Off by default; the `VRAAGBAAK_SYNTHESIZE_ANSWERS` toggle enables it.
//! Uses the same completion capability and retry policy as the question
//! rewrite.

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::Error;
use crate::models::{Message, SearchResult};
use crate::retry::RetryPolicy;

/// Behavioral rules for the assistant persona.
const ASSISTANT_PROMPT: &str = "\
Je bent een virtuele assistent voor de school. Je helpt mensen die vragen \
hebben over de school op een vriendelijke, beknopte en professionele manier.
Vragen worden feitelijk beantwoord en alleen gebaseerd op de opgehaalde \
documenten. Vragen over politiek, religie of enig ander onderwerp dat niet \
in de documenten staat, worden niet beantwoord.
Als je het antwoord op een vraag niet weet of twijfelt, kun je zeggen: \
'Ik weet het niet, ik raad aan om de school te bellen of de vraag anders te \
stellen'.";

/// Generate an answer to `question` grounded in the retrieved documents.
pub async fn synthesize_answer(
    client: &reqwest::Client,
    config: &LlmConfig,
    retry: &RetryPolicy,
    question: &str,
    results: &[SearchResult],
) -> Result<String, Error> {
    let url = format!(
        "{}/openai/deployments/{}/completions?api-version={}",
        config.endpoint.trim_end_matches('/'),
        config.completion_deployment,
        config.api_version
    );

    let context_block = build_context_block(results);
    let messages = build_messages(question, &context_block);

    let req = CompletionRequest {
        prompt: flatten_prompt(&messages),
        max_tokens: config.max_completion_tokens,
    };

    let response: CompletionResponse = retry
        .execute("answer synthesis", || {
            let url = &url;
            let req = &req;
            async move {
                let resp = client
                    .post(url)
                    .header("api-key", &config.api_key)
                    .json(req)
                    .send()
                    .await
                    .map_err(|source| Error::Transport {
                        service: "completion",
                        source,
                    })?;

                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(Error::Upstream {
                        service: "completion",
                        status,
                        body,
                    });
                }

                resp.json().await.map_err(|source| Error::Transport {
                    service: "completion",
                    source,
                })
            }
        })
        .await?;

    let answer = response
        .choices
        .into_iter()
        .next()
        .ok_or(Error::EmptyResponse {
            service: "completion",
            what: "choices",
        })?
        .text;

    Ok(answer.trim().to_string())
}

fn build_context_block(results: &[SearchResult]) -> String {
    let mut ctx = String::from("Hier zijn de opgehaalde documenten over de school:\n\n");

    if results.is_empty() {
        ctx.push_str("(Geen relevante documenten gevonden.)\n");
    } else {
        for result in results {
            ctx.push_str("- ");
            ctx.push_str(&result.title);
            ctx.push('\n');
        }
    }

    ctx
}

fn build_messages(question: &str, context_block: &str) -> Vec<Message> {
    vec![
        Message::system(ASSISTANT_PROMPT),
        Message::user(format!("{context_block}---\nVraag: {question}")),
    ]
}

fn flatten_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ─── Request/Response types ──────────────────────────────

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}
