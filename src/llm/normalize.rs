//! Question rewriting: spelling and grammar correction via the completion
//! capability, with the corrected text extracted from a fixed answer marker.

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::Error;
use crate::retry::RetryPolicy;

/// Marker the completion is instructed to prefix its correction with.
const ANSWER_MARKER: &str = "AI Antwoord: ";

/// Editing instructions sent ahead of every question to rewrite.
const EDITOR_PROMPT: &str = "\
Je bent een zeer bekwame teksteditor. Jouw taak is om de gegeven invoertekst \
te herschrijven volgens de volgende vereisten:
1. Corrigeer alle spelfouten.
2. Corrigeer alle grammaticafouten.
3. Behoud de oorspronkelijke betekenis van de tekst.
4. Behoud de oorspronkelijke toon en stijl van de tekst.
5. Voeg geen nieuwe informatie of zinnen toe.
6. Verwijder geen informatie.
7. Schrijf niet meer dan de originele tekst.

Voorbeelden:
- Origineel: \"Dit ie vrg\"
  AI Antwoord: \"Dit is een vraag\"

- Origineel: \"Welke vak heb ik in rchting Toegepaste informatic\"
  AI Antwoord: \"Welke vakken heb ik in de richting Toegepaste Informatica\"

- Origineel: \"wat is de nummer van school\"
  AI Antwoord: \"Wat is het telefoonnummer van de school\"";

/// Rewrite a raw question into corrected text.
///
/// The completion call goes through the retry policy; the result is parsed
/// for the answer marker. A response without the marker or without a line
/// break after it is a parse failure, never a silent fallback to the raw
/// question.
pub async fn rewrite_question(
    client: &reqwest::Client,
    config: &LlmConfig,
    retry: &RetryPolicy,
    question: &str,
) -> Result<String, Error> {
    let url = format!(
        "{}/openai/deployments/{}/completions?api-version={}",
        config.endpoint.trim_end_matches('/'),
        config.completion_deployment,
        config.api_version
    );

    let req = CompletionRequest {
        prompt: build_prompt(question),
        max_tokens: config.max_completion_tokens,
    };

    let response: CompletionResponse = retry
        .execute("question rewrite", || {
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

    let generated = response
        .choices
        .into_iter()
        .next()
        .ok_or(Error::EmptyResponse {
            service: "completion",
            what: "choices",
        })?
        .text;

    extract_answer(&generated)
}

fn build_prompt(question: &str) -> String {
    format!("{EDITOR_PROMPT}\n\n- Origineel: \"{question}\"\n")
}

/// Extract the corrected text between the answer marker and the next line
/// break. Both must be present; absence is a parse failure, never a
/// fallback to the uncorrected text.
fn extract_answer(generated: &str) -> Result<String, Error> {
    let start = generated
        .find(ANSWER_MARKER)
        .ok_or_else(|| Error::Parse(format!("answer marker {ANSWER_MARKER:?} not found")))?;

    let tail = &generated[start + ANSWER_MARKER.len()..];
    let end = tail
        .find('\n')
        .ok_or_else(|| Error::Parse("no line break after the answer marker".to_string()))?;

    Ok(tail[..end].to_string())
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
