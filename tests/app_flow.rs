//! App-level flows exercised without a network: commands go out over the
//! channel, results come back as events, and the tests assert on the
//! resulting route and state.

use revu::app::{ApiCmd, App, AppEvent, Route};
use revu::error::ApiError;
use revu::models::*;
use revu::session::Session;
use revu::token_store::TokenStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn temp_token_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("revu-appflow-{name}.toml"))
}

fn new_app(name: &str) -> (App, UnboundedReceiver<ApiCmd>, Arc<TokenStore>) {
    let path = temp_token_path(name);
    let _ = std::fs::remove_file(&path);
    let tokens = Arc::new(TokenStore::open(path));
    let (tx, rx) = unbounded_channel();
    let app = App::new(Session::new(tokens.clone()), tx, 10, 4, 30);
    (app, rx, tokens)
}

fn member(id: u64) -> MemberResponse {
    MemberResponse {
        id,
        nickname: format!("user{id}"),
        profile_image: None,
        created_at: None,
    }
}

fn post(id: u64, author: u64, status: PostStatus) -> PostResponse {
    PostResponse {
        id,
        title: "Hello".into(),
        content: "World".into(),
        post_status: status,
        member: member(author),
        tags: vec![TagResponse {
            id: 1,
            name: "Rust".into(),
            category: TagCategory::Language,
        }],
        created_at: None,
        updated_at: None,
    }
}

fn login_as(app: &mut App, id: u64) {
    app.session.establish(LoginResponse {
        access_token: format!("tok-{id}"),
        member: member(id),
    });
}

#[test]
fn created_post_navigates_to_its_detail_view() {
    let (mut app, mut rx, _) = new_app("create-navigates");

    app.on_event(AppEvent::PostCreated(Ok(post(42, 1, PostStatus::Unsolved))));

    assert_eq!(app.route(), Route::Detail(42));
    // Entering the detail view re-fetches the post and its comments
    let mut saw_post_fetch = false;
    let mut saw_comment_fetch = false;
    while let Ok(cmd) = rx.try_recv() {
        match cmd {
            ApiCmd::FetchPost { id, .. } => {
                assert_eq!(id, 42);
                saw_post_fetch = true;
            }
            ApiCmd::FetchComments { post_id, .. } => {
                assert_eq!(post_id, 42);
                saw_comment_fetch = true;
            }
            _ => {}
        }
    }
    assert!(saw_post_fetch && saw_comment_fetch);
    // The response itself seeds the view
    assert_eq!(app.detail.post.as_ref().unwrap().id, 42);
}

#[test]
fn unauthenticated_result_clears_token_and_lands_on_login() {
    let (mut app, mut rx, tokens) = new_app("expiry");
    login_as(&mut app, 7);
    assert!(tokens.has_token());

    app.goto_board();
    let seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPosts { seq, .. } => seq,
        other => panic!("expected FetchPosts, got {other:?}"),
    };

    app.on_event(AppEvent::PostsLoaded {
        seq,
        result: Err(ApiError::Unauthenticated),
    });

    assert_eq!(app.route(), Route::Login);
    assert!(!tokens.has_token());
    assert!(!app.session.is_authenticated());
}

#[test]
fn stale_page_response_is_dropped() {
    let (mut app, mut rx, _) = new_app("stale");

    app.goto_board();
    let first_seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPosts { seq, .. } => seq,
        other => panic!("expected FetchPosts, got {other:?}"),
    };
    // User immediately re-fetches (e.g. cycles the filter)
    app.board_cycle_filter();
    let second_seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPosts { seq, .. } => seq,
        other => panic!("expected FetchPosts, got {other:?}"),
    };
    assert!(second_seq > first_seq);

    // The first response arrives late and must not be applied
    let stale = PageResponse {
        content: vec![],
        page: 9,
        size: 10,
        total_elements: 0,
        total_pages: 10,
        has_next: false,
        has_previous: true,
    };
    app.on_event(AppEvent::PostsLoaded {
        seq: first_seq,
        result: Ok(stale),
    });
    assert!(app.board.page.is_none());
    assert!(app.board.loading);
}

#[test]
fn status_toggle_sends_opposite_and_round_trips() {
    let (mut app, mut rx, _) = new_app("toggle");
    login_as(&mut app, 1);

    app.goto_detail(5);
    let post_seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPost { seq, .. } => seq,
        other => panic!("expected FetchPost, got {other:?}"),
    };
    let _ = rx.try_recv(); // comments fetch
    app.on_event(AppEvent::PostLoaded {
        seq: post_seq,
        result: Ok(post(5, 1, PostStatus::Unsolved)),
    });

    // First toggle: PATCH carries SOLVED (the opposite of the current value)
    app.toggle_post_status();
    match rx.try_recv().unwrap() {
        ApiCmd::UpdatePostStatus { id, status } => {
            assert_eq!(id, 5);
            assert_eq!(status, PostStatus::Solved);
        }
        other => panic!("expected UpdatePostStatus, got {other:?}"),
    }
    app.on_event(AppEvent::StatusUpdated(Ok(post(5, 1, PostStatus::Solved))));

    // Second toggle goes back to UNSOLVED
    app.toggle_post_status();
    match rx.try_recv().unwrap() {
        ApiCmd::UpdatePostStatus { status, .. } => {
            assert_eq!(status, PostStatus::Unsolved);
        }
        other => panic!("expected UpdatePostStatus, got {other:?}"),
    }
    app.on_event(AppEvent::StatusUpdated(Ok(post(5, 1, PostStatus::Unsolved))));
    assert_eq!(
        app.detail.post.as_ref().unwrap().post_status,
        PostStatus::Unsolved
    );
    // Exactly the two toggles hit the wire
    assert!(rx.try_recv().is_err());
}

#[test]
fn non_author_cannot_toggle_or_delete() {
    let (mut app, mut rx, _) = new_app("not-author");
    login_as(&mut app, 2);

    app.goto_detail(5);
    let post_seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPost { seq, .. } => seq,
        other => panic!("expected FetchPost, got {other:?}"),
    };
    let _ = rx.try_recv();
    app.on_event(AppEvent::PostLoaded {
        seq: post_seq,
        result: Ok(post(5, 1, PostStatus::Unsolved)),
    });

    app.toggle_post_status();
    app.request_delete_post();
    assert!(app.confirm().is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn delete_requires_explicit_confirmation() {
    let (mut app, mut rx, _) = new_app("confirm-delete");
    login_as(&mut app, 1);

    app.goto_detail(9);
    let post_seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPost { seq, .. } => seq,
        other => panic!("expected FetchPost, got {other:?}"),
    };
    let _ = rx.try_recv();
    app.on_event(AppEvent::PostLoaded {
        seq: post_seq,
        result: Ok(post(9, 1, PostStatus::Unsolved)),
    });

    app.request_delete_post();
    assert!(app.confirm().is_some());
    // Nothing hits the wire until the user confirms
    assert!(rx.try_recv().is_err());

    app.confirm_accept();
    match rx.try_recv().unwrap() {
        ApiCmd::DeletePost { id } => assert_eq!(id, 9),
        other => panic!("expected DeletePost, got {other:?}"),
    }
}

#[test]
fn server_rejection_message_shows_verbatim_on_signup() {
    let (mut app, _rx, _) = new_app("dup-nick");

    app.goto_signup();
    app.on_event(AppEvent::SignupDone(Err(ApiError::Api {
        message: "닉네임은 이미 사용중입니다".into(),
        code: Some("DUP_NICK".into()),
    })));

    assert_eq!(
        app.auth.error.as_deref(),
        Some("닉네임은 이미 사용중입니다")
    );
    assert_eq!(app.route(), Route::Signup);
}

#[test]
fn client_side_validation_blocks_the_network() {
    let (mut app, mut rx, _) = new_app("validation");

    app.goto_login();
    app.input_char('a'); // 1-char nickname
    app.input_tab();
    app.input_char('p');
    app.input_char('w');
    app.input_enter(); // submit

    assert!(app.auth.error.is_some());
    assert!(rx.try_recv().is_err(), "invalid form must not reach the wire");
}

#[test]
fn profile_update_replaces_identity_without_refetch() {
    let (mut app, mut rx, _) = new_app("profile");
    login_as(&mut app, 3);

    app.on_event(AppEvent::ProfileUpdated(Ok(MemberResponse {
        nickname: "새이름".into(),
        ..member(3)
    })));

    assert_eq!(app.session.member().unwrap().nickname, "새이름");
    assert_eq!(app.session.member_id(), Some(3));
    assert!(rx.try_recv().is_err());
}

#[test]
fn bootstrap_failure_falls_back_to_anonymous_without_redirect() {
    let (mut app, _rx, tokens) = new_app("bootstrap-fail");
    tokens.save("stale-token");

    app.bootstrap();
    assert_eq!(app.route(), Route::Board);

    app.on_event(AppEvent::MeLoaded(Err(ApiError::Unauthenticated)));
    // A stale token means anonymous, not a forced login page
    assert_eq!(app.route(), Route::Board);
    assert!(!tokens.has_token());
    assert!(!app.session.is_authenticated());
}
