//! API task: executes app commands against the backend.
//!
//! Commands arrive over an unbounded channel, each one runs in its own task
//! so a slow request never blocks the rest, and the outcome goes back to the
//! app loop as an [`AppEvent`]. No retries anywhere: a failure surfaces
//! immediately and recovery is the user re-triggering the action.

use crate::app::{ApiCmd, AppEvent, CommentAction};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::*;
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run_api(
    client: Arc<ApiClient>,
    mut cmd_rx: UnboundedReceiver<ApiCmd>,
    event_tx: UnboundedSender<AppEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let client = client.clone();
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let event = execute(&client, cmd).await;
            let _ = tx.send(event);
        });
    }
    debug!("[revu][api] command channel closed");
}

async fn execute(client: &ApiClient, cmd: ApiCmd) -> AppEvent {
    match cmd {
        ApiCmd::FetchMe => AppEvent::MeLoaded(client.me().await),

        ApiCmd::Login { nickname, password } => {
            let req = LoginRequest { nickname, password };
            AppEvent::LoginDone(client.login(&req).await)
        }

        // Register, then log in with the same credentials. Either step's
        // failure aborts the whole operation and surfaces that step's error.
        ApiCmd::Signup { nickname, password } => {
            AppEvent::SignupDone(signup_then_login(client, nickname, password).await)
        }

        ApiCmd::FetchPosts { seq, query } => AppEvent::PostsLoaded {
            seq,
            result: client.posts(&query).await,
        },

        ApiCmd::FetchPost { seq, id } => AppEvent::PostLoaded {
            seq,
            result: client.post(id).await,
        },

        ApiCmd::FetchComments { seq, post_id } => AppEvent::CommentsLoaded {
            seq,
            post_id,
            result: client.comments(post_id).await,
        },

        ApiCmd::FetchTags => AppEvent::TagsLoaded(client.tags().await),

        ApiCmd::CreatePost(req) => AppEvent::PostCreated(client.create_post(&req).await),

        ApiCmd::UpdatePost { id, req } => {
            AppEvent::PostUpdated(client.update_post(id, &req).await)
        }

        ApiCmd::DeletePost { id } => AppEvent::PostDeleted(client.delete_post(id).await),

        ApiCmd::UpdatePostStatus { id, status } => {
            AppEvent::StatusUpdated(client.update_post_status(id, status).await)
        }

        ApiCmd::CreateComment { post_id, content } => {
            let req = CommentCreateRequest { content };
            AppEvent::CommentMutated {
                action: CommentAction::Created,
                post_id,
                result: client.create_comment(post_id, &req).await.map(|_| ()),
            }
        }

        ApiCmd::UpdateComment { id, post_id, content } => {
            let req = CommentUpdateRequest { content };
            AppEvent::CommentMutated {
                action: CommentAction::Updated,
                post_id,
                result: client.update_comment(id, &req).await.map(|_| ()),
            }
        }

        ApiCmd::DeleteComment { id, post_id } => AppEvent::CommentMutated {
            action: CommentAction::Deleted,
            post_id,
            result: client.delete_comment(id).await,
        },

        ApiCmd::UpdateProfile { nickname } => {
            let req = MemberUpdateRequest { nickname };
            AppEvent::ProfileUpdated(client.update_me(&req).await)
        }

        ApiCmd::FetchMyPosts { seq, page, size } => AppEvent::MyPostsLoaded {
            seq,
            result: client.my_posts(page, size).await,
        },
    }
}

async fn signup_then_login(
    client: &ApiClient,
    nickname: String,
    password: String,
) -> Result<LoginResponse, ApiError> {
    client
        .signup(&SignUpRequest {
            nickname: nickname.clone(),
            password: password.clone(),
        })
        .await?;
    client.login(&LoginRequest { nickname, password }).await
}
