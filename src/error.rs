use axum::http::StatusCode;
use thiserror::Error;

/// Runtime failure kinds of the question pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable caller input. Never retried.
    #[error("invalid input: {0}")]
    Input(String),

    /// The completion answered without the expected marker structure.
    #[error("malformed completion response: {0}")]
    Parse(String),

    /// A remote capability could not be reached or produced unreadable output.
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A remote capability answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// A remote capability answered 2xx but without the promised payload.
    #[error("{service} response contained no {what}")]
    EmptyResponse {
        service: &'static str,
        what: &'static str,
    },
}

impl Error {
    /// Response status the host boundary maps this failure to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Input(_) => StatusCode::BAD_REQUEST,
            Error::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Transport { .. } | Error::Upstream { .. } | Error::EmptyResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// Startup configuration failures. Fatal: the service refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_maps_to_bad_request() {
        let err = Error::Input("question must not be empty".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_maps_to_internal_error() {
        let err = Error::Parse("marker not found".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_remote_kinds_map_to_bad_gateway() {
        let upstream = Error::Upstream {
            service: "search",
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "throttled".into(),
        };
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let empty = Error::EmptyResponse {
            service: "embeddings",
            what: "data",
        };
        assert_eq!(empty.status(), StatusCode::BAD_GATEWAY);
    }
}
