use thiserror::Error;

/// Why a resolution cycle stopped short of a snapshot.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No location matches '{0}'")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ResolveError {
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::NotFound(_) => FailureReason::NotFound,
            Self::Network(_) => FailureReason::Network,
            Self::MalformedResponse(_) => FailureReason::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// The part of a [`ResolveError`] kept in state, comparable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NotFound,
    Network,
    MalformedResponse,
}

impl FailureReason {
    /// User-friendly message for the prompt area.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "Location not found. Try another name.",
            Self::Network => "Network error. Check your connection.",
            Self::MalformedResponse => "The weather service sent an unexpected response.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_follows_variant() {
        assert_eq!(ResolveError::NotFound("x".into()).reason(), FailureReason::NotFound);
        assert_eq!(ResolveError::Network("x".into()).reason(), FailureReason::Network);
        assert_eq!(
            ResolveError::MalformedResponse("x".into()).reason(),
            FailureReason::MalformedResponse
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = ResolveError::NotFound("Atlantis".into());
        assert!(err.to_string().contains("Atlantis"));
        assert!(FailureReason::Network.user_message().contains("Network"));
    }
}
