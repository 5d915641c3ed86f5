//! Wire types for the Revu backend API.
//!
//! Everything here mirrors the backend's JSON contract one-to-one (camelCase
//! on the wire). The client treats these as opaque value types: transient
//! copies live in view state and are re-fetched on every navigation, never
//! cached.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Uniform response wrapper used by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
}

/// One page of a larger result set plus pagination metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Page numbers to offer in the pager: a window of up to five pages
    /// centered on the current one, clamped to `[0, total_pages)`.
    pub fn page_numbers(&self) -> Vec<u32> {
        if self.total_pages <= 1 {
            return Vec::new();
        }
        let start = self.page.saturating_sub(2);
        let end = (self.page + 2).min(self.total_pages - 1);
        (start..=end).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    #[serde(rename = "SOLVED")]
    Solved,
    #[serde(rename = "UNSOLVED")]
    Unsolved,
}

impl PostStatus {
    /// The value a status-toggle PATCH must carry: the opposite of `self`.
    pub fn toggled(self) -> PostStatus {
        match self {
            PostStatus::Solved => PostStatus::Unsolved,
            PostStatus::Unsolved => PostStatus::Solved,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostStatus::Solved => "해결됨",
            PostStatus::Unsolved => "미해결",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagCategory {
    #[serde(rename = "LANGUAGE")]
    Language,
    #[serde(rename = "FRAMEWORK")]
    Framework,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: u64,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub member: MemberResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagResponse {
    pub id: u64,
    pub name: String,
    pub category: TagCategory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub post_status: PostStatus,
    pub member: MemberResponse,
    pub tags: Vec<TagResponse>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Row shape of the board listing (no body, adds the comment count).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub id: u64,
    pub title: String,
    pub status: PostStatus,
    pub comment_count: u32,
    pub member: MemberResponse,
    pub tags: Vec<TagResponse>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: u64,
    pub content: String,
    pub member: MemberResponse,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub modified: bool,
}

// --- Request bodies ---------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdateRequest {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostStatusUpdateRequest {
    pub status: PostStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentCreateRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentUpdateRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberUpdateRequest {
    pub nickname: String,
}

/// Display form for backend timestamps: `YYYY-MM-DD HH:MM`.
pub fn fmt_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_response_decodes_camel_case() {
        let json = r#"{
            "content": [],
            "page": 3,
            "size": 10,
            "totalElements": 57,
            "totalPages": 6,
            "hasNext": true,
            "hasPrevious": true
        }"#;
        let page: PageResponse<PostListResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_elements, 57);
        assert!(page.has_next);
    }

    #[test]
    fn page_numbers_clamp_to_bounds() {
        let mk = |page, total_pages| PageResponse::<PostListResponse> {
            content: vec![],
            page,
            size: 10,
            total_elements: 0,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: page > 0,
        };
        assert_eq!(mk(0, 6).page_numbers(), vec![0, 1, 2]);
        assert_eq!(mk(3, 6).page_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(mk(5, 6).page_numbers(), vec![3, 4, 5]);
        assert!(mk(0, 1).page_numbers().is_empty());
    }

    #[test]
    fn status_toggles_round_trip() {
        assert_eq!(PostStatus::Solved.toggled(), PostStatus::Unsolved);
        assert_eq!(PostStatus::Solved.toggled().toggled(), PostStatus::Solved);
    }

    #[test]
    fn post_decodes_backend_shape() {
        let json = r#"{
            "id": 42,
            "title": "Hello",
            "content": "World",
            "postStatus": "UNSOLVED",
            "member": {"id": 1, "nickname": "dev", "profileImage": null, "createdAt": "2026-01-02T10:30:00"},
            "tags": [{"id": 1, "name": "Rust", "category": "LANGUAGE"}],
            "createdAt": "2026-01-02T10:30:00",
            "updatedAt": "2026-01-02T10:30:00"
        }"#;
        let post: PostResponse = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.post_status, PostStatus::Unsolved);
        assert_eq!(post.tags[0].category, TagCategory::Language);
        assert_eq!(fmt_timestamp(post.created_at), "2026-01-02 10:30");
    }
}
