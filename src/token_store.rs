//! Persisted access token.
//!
//! The token is the only durable piece of client-side state. It lives in a
//! small TOML file (`~/.config/revu/auth.toml` unless `REVU_TOKEN_PATH`
//! points elsewhere) and is cleared on logout or session expiry.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Default, Serialize, Deserialize)]
struct AuthFile {
    access_token: Option<String>,
}

/// Shared between the HTTP client (reads per request) and the session store
/// (writes on login/logout). Interior lock so both sides can hold an `Arc`.
pub struct TokenStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Open the store and load whatever token is on disk.
    pub fn open(path: PathBuf) -> Self {
        let token = read_token(&path);
        if token.is_some() {
            debug!("[revu][token] loaded persisted token from {}", path.display());
        }
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    /// Resolve the token file path: `REVU_TOKEN_PATH` override, else
    /// `$HOME/.config/revu/auth.toml`, else relative fallback.
    pub fn default_path() -> PathBuf {
        std::env::var("REVU_TOKEN_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config").join("revu").join("auth.toml"))
            })
            .unwrap_or_else(|| PathBuf::from("revu-auth.toml"))
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn has_token(&self) -> bool {
        matches!(self.get().as_deref(), Some(t) if !t.is_empty())
    }

    /// Persist a new token (memory + disk).
    pub fn save(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
        let file = AuthFile {
            access_token: Some(token.to_string()),
        };
        if let Err(e) = write_file(&self.path, &file) {
            warn!("[revu][token] failed to persist token: {e}");
        }
    }

    /// Drop the token from memory and disk.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("[revu][token] failed to remove token file: {e}");
            }
        }
        debug!("[revu][token] token cleared");
    }
}

fn read_token(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let file: AuthFile = toml::from_str(&content).ok()?;
    file.access_token.filter(|t| !t.is_empty())
}

fn write_file(path: &Path, file: &AuthFile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(file)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("revu-token-test-{name}.toml"))
    }

    #[test]
    fn save_then_reopen_round_trips() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let store = TokenStore::open(path.clone());
        assert!(!store.has_token());
        store.save("tok-123");
        assert_eq!(store.get().as_deref(), Some("tok-123"));

        let reopened = TokenStore::open(path.clone());
        assert_eq!(reopened.get().as_deref(), Some("tok-123"));

        reopened.clear();
        assert!(!reopened.has_token());
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_anonymous() {
        let store = TokenStore::open(temp_path("missing-never-created"));
        assert!(store.get().is_none());
    }
}
