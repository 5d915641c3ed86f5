//! Session store: who is looking at this tab of the terminal.
//!
//! An explicit value constructed in `main` and owned by the app — no global
//! state. Writes go through the four auth operations (bootstrap outcome,
//! login/signup establish, logout clear, profile update); everything else
//! only reads.

use crate::models::{LoginResponse, MemberResponse};
use crate::token_store::TokenStore;
use log::{debug, info};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Before bootstrap has decided anything.
    Uninitialized,
    /// A persisted token exists and `/members/me` is in flight.
    Loading,
    Authenticated,
    Anonymous,
}

pub struct Session {
    tokens: Arc<TokenStore>,
    state: SessionState,
    member: Option<MemberResponse>,
}

impl Session {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self {
            tokens,
            state: SessionState::Uninitialized,
            member: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Uninitialized | SessionState::Loading)
    }

    pub fn member(&self) -> Option<&MemberResponse> {
        self.member.as_ref()
    }

    /// `userId` for authorship checks; stable between auth operations.
    pub fn member_id(&self) -> Option<u64> {
        self.member.as_ref().map(|m| m.id)
    }

    /// Startup decision: with no persisted token we are anonymous outright;
    /// with one, the caller must fetch the profile and report back via
    /// [`Session::resolve`] or [`Session::clear`].
    pub fn begin_bootstrap(&mut self) -> bool {
        if self.tokens.has_token() {
            self.state = SessionState::Loading;
            debug!("[revu][session] token found, validating");
            true
        } else {
            self.state = SessionState::Anonymous;
            false
        }
    }

    /// Bootstrap succeeded: the persisted token resolved to a member.
    pub fn resolve(&mut self, member: MemberResponse) {
        info!("[revu][session] restored session for {}", member.nickname);
        self.member = Some(member);
        self.state = SessionState::Authenticated;
    }

    /// Login or signup succeeded: persist the token, hold the member.
    pub fn establish(&mut self, login: LoginResponse) {
        info!("[revu][session] logged in as {}", login.member.nickname);
        self.tokens.save(&login.access_token);
        self.member = Some(login.member);
        self.state = SessionState::Authenticated;
    }

    /// Logout, bootstrap failure, or 401: drop token and identity.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.member = None;
        self.state = SessionState::Anonymous;
    }

    /// Replace the in-memory profile after a confirmed edit. No network.
    pub fn update_user(&mut self, member: MemberResponse) {
        debug!("[revu][session] profile updated: {}", member.nickname);
        self.member = Some(member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str) -> Session {
        let path = std::env::temp_dir().join(format!("revu-session-test-{name}.toml"));
        let _ = std::fs::remove_file(&path);
        Session::new(Arc::new(TokenStore::open(path)))
    }

    fn member(id: u64) -> MemberResponse {
        MemberResponse {
            id,
            nickname: format!("user{id}"),
            profile_image: None,
            created_at: None,
        }
    }

    #[test]
    fn bootstrap_without_token_goes_anonymous() {
        let mut s = session("no-token");
        assert_eq!(*s.state(), SessionState::Uninitialized);
        assert!(!s.begin_bootstrap());
        assert_eq!(*s.state(), SessionState::Anonymous);
    }

    #[test]
    fn bootstrap_with_token_loads_then_resolves() {
        let mut s = session("with-token");
        s.tokens.save("tok");
        assert!(s.begin_bootstrap());
        assert_eq!(*s.state(), SessionState::Loading);
        s.resolve(member(1));
        assert!(s.is_authenticated());
        assert_eq!(s.member_id(), Some(1));
    }

    #[test]
    fn establish_persists_token_and_clear_drops_it() {
        let mut s = session("establish");
        s.establish(LoginResponse {
            access_token: "tok-9".into(),
            member: member(9),
        });
        assert!(s.is_authenticated());
        assert!(s.tokens.has_token());

        s.clear();
        assert_eq!(*s.state(), SessionState::Anonymous);
        assert!(s.member().is_none());
        assert!(!s.tokens.has_token());
    }

    #[test]
    fn update_user_keeps_authentication() {
        let mut s = session("update");
        s.establish(LoginResponse {
            access_token: "tok".into(),
            member: member(3),
        });
        s.update_user(MemberResponse {
            nickname: "renamed".into(),
            ..member(3)
        });
        assert!(s.is_authenticated());
        assert_eq!(s.member().unwrap().nickname, "renamed");
        assert_eq!(s.member_id(), Some(3));
    }
}
