//! Rendering a fetched post body into segments and copying code blocks
//! through the app surface.

use revu::app::{ApiCmd, App, AppEvent};
use revu::content::Segment;
use revu::models::*;
use revu::session::Session;
use revu::token_store::TokenStore;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn new_app(name: &str) -> (App, UnboundedReceiver<ApiCmd>) {
    let path = std::env::temp_dir().join(format!("revu-copy-{name}.toml"));
    let _ = std::fs::remove_file(&path);
    let tokens = Arc::new(TokenStore::open(path));
    let (tx, rx) = unbounded_channel();
    (App::new(Session::new(tokens), tx, 10, 4, 30), rx)
}

fn post_with(content: &str) -> PostResponse {
    PostResponse {
        id: 1,
        title: "리뷰 부탁드립니다".into(),
        content: content.into(),
        post_status: PostStatus::Unsolved,
        member: MemberResponse {
            id: 1,
            nickname: "dev".into(),
            profile_image: None,
            created_at: None,
        },
        tags: vec![],
        created_at: None,
        updated_at: None,
    }
}

fn open_post(app: &mut App, rx: &mut UnboundedReceiver<ApiCmd>, content: &str) {
    app.goto_detail(1);
    let seq = match rx.try_recv().unwrap() {
        ApiCmd::FetchPost { seq, .. } => seq,
        other => panic!("expected FetchPost, got {other:?}"),
    };
    let _ = rx.try_recv(); // comments fetch
    app.on_event(AppEvent::PostLoaded {
        seq,
        result: Ok(post_with(content)),
    });
}

#[test]
fn fetched_body_parses_into_ordered_segments() {
    let (mut app, mut rx) = new_app("segments");
    open_post(&mut app, &mut rx, "before\n```file.py\nprint(1)\n```\nafter");

    assert_eq!(
        app.detail.segments,
        vec![
            Segment::Paragraph("before".into()),
            Segment::Code {
                label: Some("file.py".into()),
                body: "print(1)".into(),
            },
            Segment::Paragraph("after".into()),
        ]
    );
    assert_eq!(app.detail.code_block_count(), 1);
}

#[test]
fn copy_captures_the_trimmed_selected_block() {
    let (mut app, mut rx) = new_app("copy");
    open_post(
        &mut app,
        &mut rx,
        "intro\n```a.rs\nfn a() {}\n```\nmid\n```b.rs\n  fn b() {}  \n```",
    );
    assert_eq!(app.detail.code_block_count(), 2);

    assert_eq!(app.copy_block_payload().as_deref(), Some("fn a() {}"));

    app.detail_next_block();
    assert_eq!(app.copy_block_payload().as_deref(), Some("fn b() {}"));

    // Acknowledgment is tracked per block
    app.mark_block_copied();
    assert!(app.detail.block_copied_recently(1));
    assert!(!app.detail.block_copied_recently(0));
}

#[test]
fn body_without_code_has_nothing_to_copy() {
    let (mut app, mut rx) = new_app("no-code");
    open_post(&mut app, &mut rx, "그냥 글입니다\n- 항목 하나\n- 항목 둘");

    assert_eq!(app.detail.code_block_count(), 0);
    assert!(app.copy_block_payload().is_none());
    assert_eq!(
        app.detail.segments,
        vec![
            Segment::Paragraph("그냥 글입니다".into()),
            Segment::List(vec!["항목 하나".into(), "항목 둘".into()]),
        ]
    );
}
