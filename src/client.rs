//! HTTP client wrapper for the Revu backend.
//!
//! One job: path + optional body in, decoded envelope payload out. The
//! bearer token is read from the shared [`TokenStore`] on every request (the
//! store is the durable source of truth, not this client). A 401 maps to
//! [`ApiError::Unauthenticated`] and nothing else — session teardown and
//! navigation are the app loop's business.

use crate::error::ApiError;
use crate::models::*;
use crate::token_store::TokenStore;
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_ms: u64, tokens: Arc<TokenStore>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[revu][api] {} {}", method, path);

        let mut request = self.http.request(method, url);
        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();
        if !status.is_success() {
            warn!("[revu][api] {} -> {}", path, status);
        }
        Ok((status, bytes))
    }

    async fn fetch<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let body = body
            .map(|b| serde_json::to_value(b).map_err(|e| ApiError::Decode(e.to_string())))
            .transpose()?;
        let (status, bytes) = self.send(method, path, body).await?;
        decode_payload(status, &bytes)
    }

    async fn fetch_no_content(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let (status, bytes) = self.send(method, path, None).await?;
        decode_no_content(status, &bytes)
    }

    // --- members ---

    pub async fn signup(&self, req: &SignUpRequest) -> Result<MemberResponse, ApiError> {
        self.fetch(Method::POST, "/api/v1/members/signup", Some(req)).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.fetch(Method::POST, "/api/v1/members/login", Some(req)).await
    }

    pub async fn me(&self) -> Result<MemberResponse, ApiError> {
        self.fetch(Method::GET, "/api/v1/members/me", None::<&()>).await
    }

    pub async fn update_me(&self, req: &MemberUpdateRequest) -> Result<MemberResponse, ApiError> {
        self.fetch(Method::PATCH, "/api/v1/members/me", Some(req)).await
    }

    // --- posts ---

    pub async fn posts(
        &self,
        query: &PostQuery,
    ) -> Result<PageResponse<PostListResponse>, ApiError> {
        let path = format!("/api/v1/posts?{}", query.to_query_string());
        self.fetch(Method::GET, &path, None::<&()>).await
    }

    pub async fn my_posts(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<PostListResponse>, ApiError> {
        let path = format!("/api/v1/posts/me?page={page}&size={size}");
        self.fetch(Method::GET, &path, None::<&()>).await
    }

    pub async fn post(&self, id: u64) -> Result<PostResponse, ApiError> {
        self.fetch(Method::GET, &format!("/api/v1/posts/{id}"), None::<&()>)
            .await
    }

    pub async fn create_post(&self, req: &PostCreateRequest) -> Result<PostResponse, ApiError> {
        self.fetch(Method::POST, "/api/v1/posts", Some(req)).await
    }

    pub async fn update_post(
        &self,
        id: u64,
        req: &PostUpdateRequest,
    ) -> Result<PostResponse, ApiError> {
        self.fetch(Method::PUT, &format!("/api/v1/posts/{id}"), Some(req))
            .await
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        self.fetch_no_content(Method::DELETE, &format!("/api/v1/posts/{id}"))
            .await
    }

    pub async fn update_post_status(
        &self,
        id: u64,
        status: PostStatus,
    ) -> Result<PostResponse, ApiError> {
        let req = PostStatusUpdateRequest { status };
        self.fetch(Method::PATCH, &format!("/api/v1/posts/{id}/status"), Some(&req))
            .await
    }

    // --- comments ---

    pub async fn comments(&self, post_id: u64) -> Result<Vec<CommentResponse>, ApiError> {
        self.fetch(
            Method::GET,
            &format!("/api/v1/posts/{post_id}/comments"),
            None::<&()>,
        )
        .await
    }

    pub async fn create_comment(
        &self,
        post_id: u64,
        req: &CommentCreateRequest,
    ) -> Result<CommentResponse, ApiError> {
        self.fetch(
            Method::POST,
            &format!("/api/v1/posts/{post_id}/comments"),
            Some(req),
        )
        .await
    }

    pub async fn update_comment(
        &self,
        id: u64,
        req: &CommentUpdateRequest,
    ) -> Result<CommentResponse, ApiError> {
        self.fetch(Method::PATCH, &format!("/api/v1/comments/{id}"), Some(req))
            .await
    }

    pub async fn delete_comment(&self, id: u64) -> Result<(), ApiError> {
        self.fetch_no_content(Method::DELETE, &format!("/api/v1/comments/{id}"))
            .await
    }

    // --- tags ---

    pub async fn tags(&self) -> Result<Vec<TagResponse>, ApiError> {
        self.fetch(Method::GET, "/api/v1/tags", None::<&()>).await
    }
}

/// Board listing query. `status: None` means the ALL filter (parameter
/// omitted), and an empty keyword is likewise omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub page: u32,
    pub size: u32,
    pub status: Option<PostStatus>,
    pub keyword: Option<String>,
}

impl PostQuery {
    pub fn to_query_string(&self) -> String {
        let mut qs = format!("page={}&size={}", self.page, self.size);
        if let Some(status) = self.status {
            let status = match status {
                PostStatus::Solved => "SOLVED",
                PostStatus::Unsolved => "UNSOLVED",
            };
            qs.push_str(&format!("&status={status}"));
        }
        if let Some(keyword) = self.keyword.as_deref() {
            if !keyword.is_empty() {
                qs.push_str(&format!("&keyword={}", urlencoding::encode(keyword)));
            }
        }
        qs
    }
}

/// Decode a typed response body. Pure so the 401/empty/envelope branches are
/// testable without a server.
pub fn decode_payload<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthenticated);
    }
    if status == StatusCode::NO_CONTENT || body.is_empty() {
        // Only delete endpoints respond empty; a typed call expecting a
        // payload cannot treat this as success.
        return Err(ApiError::Decode("empty response body".to_string()));
    }
    let envelope: ApiEnvelope<T> =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    unwrap_envelope(envelope)
}

/// Decode a response where no payload is expected. 204 and zero-length
/// bodies count as success.
pub fn decode_no_content(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthenticated);
    }
    if status == StatusCode::NO_CONTENT || body.is_empty() {
        return Ok(());
    }
    let envelope: ApiEnvelope<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success {
        Ok(())
    } else {
        Err(envelope_error(envelope.message, envelope.error_code))
    }
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(envelope_error(envelope.message, envelope.error_code));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("missing data payload".to_string()))
}

fn envelope_error(message: Option<String>, code: Option<String>) -> ApiError {
    ApiError::Api {
        message: message.unwrap_or_else(|| "요청에 실패했습니다.".to_string()),
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_unauthenticated() {
        let err = decode_payload::<MemberResponse>(StatusCode::UNAUTHORIZED, b"").unwrap_err();
        assert!(err.is_unauthenticated());
        let err = decode_no_content(StatusCode::UNAUTHORIZED, b"").unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[test]
    fn no_content_succeeds_on_empty_path_only() {
        assert!(decode_no_content(StatusCode::NO_CONTENT, b"").is_ok());
        assert!(decode_no_content(StatusCode::OK, b"").is_ok());
        assert!(decode_payload::<MemberResponse>(StatusCode::OK, b"").is_err());
    }

    #[test]
    fn false_success_carries_message_and_code() {
        let body = r#"{"success":false,"data":null,"message":"닉네임은 이미 사용중입니다","errorCode":"DUP_NICK"}"#.as_bytes();
        let err = decode_payload::<MemberResponse>(StatusCode::CONFLICT, body).unwrap_err();
        match err {
            ApiError::Api { message, code } => {
                assert_eq!(message, "닉네임은 이미 사용중입니다");
                assert_eq!(code.as_deref(), Some("DUP_NICK"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn false_success_without_message_uses_fallback() {
        let body = br#"{"success":false,"data":null,"message":null,"errorCode":null}"#;
        let err = decode_payload::<MemberResponse>(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err.user_message(), "요청에 실패했습니다.");
    }

    #[test]
    fn true_success_unwraps_data() {
        let body = br#"{"success":true,"data":{"id":7,"nickname":"dev","profileImage":null,"createdAt":null},"message":null,"errorCode":null}"#;
        let member: MemberResponse = decode_payload(StatusCode::OK, body).unwrap();
        assert_eq!(member.id, 7);
        assert_eq!(member.nickname, "dev");
    }

    #[test]
    fn query_string_omits_all_filter_and_encodes_keyword() {
        let query = PostQuery {
            page: 2,
            size: 10,
            status: None,
            keyword: Some("버그 수정".into()),
        };
        let qs = query.to_query_string();
        assert!(qs.starts_with("page=2&size=10"));
        assert!(!qs.contains("status="));
        assert!(qs.contains("keyword=%EB%B2%84%EA%B7%B8%20%EC%88%98%EC%A0%95"));

        let query = PostQuery {
            page: 0,
            size: 10,
            status: Some(PostStatus::Unsolved),
            keyword: None,
        };
        assert_eq!(query.to_query_string(), "page=0&size=10&status=UNSOLVED");
    }
}
