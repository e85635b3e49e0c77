use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::Error;
use crate::retry::RetryPolicy;

/// Generate an embedding for a single text via the embeddings deployment.
///
/// The call is retry-wrapped like every other outbound capability call.
/// The vector is returned as the provider produced it; dimensionality is
/// fixed by the deployed embedding model.
pub async fn embed_single(
    client: &reqwest::Client,
    config: &LlmConfig,
    retry: &RetryPolicy,
    text: &str,
) -> Result<Vec<f32>, Error> {
    let url = format!(
        "{}/openai/deployments/{}/embeddings?api-version={}",
        config.endpoint.trim_end_matches('/'),
        config.embedding_deployment,
        config.api_version
    );

    let req = EmbedRequest {
        input: text.to_string(),
    };

    let response: EmbedResponse = retry
        .execute("embedding", || {
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
                        service: "embeddings",
                        source,
                    })?;

                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(Error::Upstream {
                        service: "embeddings",
                        status,
                        body,
                    });
                }

                resp.json().await.map_err(|source| Error::Transport {
                    service: "embeddings",
                    source,
                })
            }
        })
        .await?;

    response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or(Error::EmptyResponse {
            service: "embeddings",
            what: "data",
        })
}

// ─── Request/Response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedRequest {
    input: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}
