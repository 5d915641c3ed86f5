//! Typed failures for the API seam.
//!
//! Every call through [`crate::client::ApiClient`] resolves to one of these.
//! `Unauthenticated` is special: the client never acts on it, the app event
//! loop does (clear session, go to login).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401 from any endpoint. Handled centrally by the app loop.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Backend rejected the request (`success: false` envelope).
    #[error("{message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Localized message for display. Server-provided messages pass through
    /// verbatim; transport/decode failures collapse to a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Unauthenticated => "인증이 만료되었습니다. 다시 로그인해주세요.".to_string(),
            ApiError::Network(_) | ApiError::Decode(_) => "요청에 실패했습니다.".to_string(),
        }
    }

    /// Machine-readable error code, when the backend supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_passes_through_verbatim() {
        let err = ApiError::Api {
            message: "닉네임은 이미 사용중입니다".into(),
            code: Some("DUP_NICK".into()),
        };
        assert_eq!(err.user_message(), "닉네임은 이미 사용중입니다");
        assert_eq!(err.code(), Some("DUP_NICK"));
    }

    #[test]
    fn transport_failure_uses_generic_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message(), "요청에 실패했습니다.");
        assert_eq!(err.code(), None);
    }
}
