//! Client-side form validation.
//!
//! Runs before any network call and blocks submission with a localized
//! message. It duplicates but never replaces server-side validation; when the
//! backend rejects anyway, its message wins for display.

/// Nickname and password share the 2..=20 length rule. Lengths count
/// characters, not bytes (nicknames are routinely Hangul).
const CRED_MIN: usize = 2;
const CRED_MAX: usize = 20;

pub const TITLE_MAX: usize = 255;

pub fn validate_nickname(nickname: &str) -> Result<(), String> {
    let len = nickname.chars().count();
    if len < CRED_MIN || len > CRED_MAX {
        return Err("닉네임은 2~20자여야 합니다.".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < CRED_MIN || len > CRED_MAX {
        return Err("비밀번호는 2~20자여야 합니다.".to_string());
    }
    Ok(())
}

pub fn validate_post_form(title: &str, content: &str, tag_ids: &[u64]) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("제목을 입력하세요.".to_string());
    }
    if title.chars().count() > TITLE_MAX {
        return Err("제목은 255자 이하여야 합니다.".to_string());
    }
    if content.trim().is_empty() {
        return Err("내용을 입력하세요.".to_string());
    }
    if tag_ids.is_empty() {
        return Err("태그를 하나 이상 선택하세요.".to_string());
    }
    Ok(())
}

pub fn validate_comment(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("댓글 내용을 입력하세요.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_length_boundaries() {
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname("a").is_err());
        assert!(validate_nickname("ab").is_ok());
        assert!(validate_nickname(&"a".repeat(20)).is_ok());
        assert!(validate_nickname(&"a".repeat(21)).is_err());
    }

    #[test]
    fn nickname_counts_chars_not_bytes() {
        // 2 Hangul characters are 6 bytes but must pass
        assert!(validate_nickname("가나").is_ok());
    }

    #[test]
    fn password_length_boundaries() {
        assert!(validate_password("x").is_err());
        assert!(validate_password("xy").is_ok());
        assert!(validate_password(&"x".repeat(20)).is_ok());
        assert!(validate_password(&"x".repeat(21)).is_err());
    }

    #[test]
    fn post_form_requires_all_fields() {
        assert!(validate_post_form("", "body", &[1]).is_err());
        assert!(validate_post_form("   ", "body", &[1]).is_err());
        assert!(validate_post_form("t", "", &[1]).is_err());
        assert!(validate_post_form("t", "body", &[]).is_err());
        assert!(validate_post_form("t", "body", &[1]).is_ok());
    }

    #[test]
    fn title_over_255_chars_is_rejected() {
        assert!(validate_post_form(&"t".repeat(256), "body", &[1]).is_err());
        assert!(validate_post_form(&"t".repeat(255), "body", &[1]).is_ok());
    }
}
