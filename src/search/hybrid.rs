//! Hybrid retrieval against the remote document index.
//!
//! One request carries both the full-text query and the embedding vector;
//! the index fuses lexical and vector relevance into a single ranking.
//! Fusion policy and tie-breaking are owned by the provider.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::Error;
use crate::models::SearchResult;
use crate::retry::RetryPolicy;

/// REST contract version of the index provider.
const SEARCH_API_VERSION: &str = "2023-11-01";
/// Index field holding document embeddings.
const VECTOR_FIELD: &str = "embedding";
/// Document fields returned per result.
const SELECT_FIELDS: &str = "title";

/// Retrieve the `top_k` documents best matching the query text + vector.
///
/// The returned list is ordered by the provider's fused relevance score,
/// descending, and never longer than `top_k` regardless of what the
/// provider sends back.
pub async fn hybrid_search(
    client: &reqwest::Client,
    config: &SearchConfig,
    retry: &RetryPolicy,
    query_text: &str,
    query_vector: &[f32],
    top_k: usize,
) -> Result<Vec<SearchResult>, Error> {
    let url = format!(
        "{}/indexes/{}/docs/search?api-version={}",
        config.endpoint.trim_end_matches('/'),
        config.index_name,
        SEARCH_API_VERSION
    );

    let req = HybridSearchRequest {
        search: query_text.to_string(),
        vector_queries: vec![VectorQuery {
            kind: "vector",
            vector: query_vector.to_vec(),
            k: top_k,
            fields: VECTOR_FIELD,
        }],
        select: SELECT_FIELDS,
        top: top_k,
    };

    let response: HybridSearchResponse = retry
        .execute("hybrid search", || {
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
                        service: "search",
                        source,
                    })?;

                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(Error::Upstream {
                        service: "search",
                        status,
                        body,
                    });
                }

                resp.json().await.map_err(|source| Error::Transport {
                    service: "search",
                    source,
                })
            }
        })
        .await?;

    let mut results = response.value;
    results.truncate(top_k);
    Ok(results)
}

// ─── Request/Response types ──────────────────────────────

#[derive(Serialize)]
struct HybridSearchRequest {
    search: String,
    #[serde(rename = "vectorQueries")]
    vector_queries: Vec<VectorQuery>,
    select: &'static str,
    top: usize,
}

#[derive(Serialize)]
struct VectorQuery {
    kind: &'static str,
    vector: Vec<f32>,
    k: usize,
    fields: &'static str,
}

#[derive(Deserialize)]
struct HybridSearchResponse {
    value: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = HybridSearchRequest {
            search: "wat is de nummer van school".into(),
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector: vec![0.1, 0.2],
                k: 3,
                fields: VECTOR_FIELD,
            }],
            select: SELECT_FIELDS,
            top: 3,
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["search"], "wat is de nummer van school");
        assert_eq!(json["top"], 3);
        assert_eq!(json["select"], "title");
        assert_eq!(json["vectorQueries"][0]["kind"], "vector");
        assert_eq!(json["vectorQueries"][0]["k"], 3);
        assert_eq!(json["vectorQueries"][0]["fields"], "embedding");
    }

    #[test]
    fn test_response_parses_provider_results() {
        let body = r#"{
            "value": [
                {"@search.score": 2.1, "title": "Telefoonnummers"},
                {"@search.score": 1.4, "title": "Contact"}
            ]
        }"#;

        let response: HybridSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.value.len(), 2);
        assert_eq!(response.value[0].title, "Telefoonnummers");
        assert!(response.value[0].score > response.value[1].score);
    }
}
