//! Application state and page controllers.
//!
//! `App` owns every piece of view state plus the session, translates key
//! intents into API commands, and applies result events. Controllers never
//! touch the network directly: they enqueue an [`ApiCmd`] and later receive
//! an [`AppEvent`] from the API task. A fetch sequence number per view drops
//! responses that arrive after the user has navigated away.
//!
//! The one cross-cutting rule lives in [`App::on_event`]: any
//! `Unauthenticated` result clears the session (memory and token file) and
//! lands on the login view, no matter which page issued the call.

use crate::client::PostQuery;
use crate::content::{parse_content, Segment};
use crate::error::ApiError;
use crate::models::*;
use crate::session::Session;
use crate::validate;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

const TOAST_TTL: Duration = Duration::from_millis(2500);
/// How long the per-block "copied" acknowledgment stays visible.
const COPIED_TTL: Duration = Duration::from_millis(2000);

/// Commands the app enqueues for the API task.
#[derive(Debug)]
pub enum ApiCmd {
    FetchMe,
    Login { nickname: String, password: String },
    Signup { nickname: String, password: String },
    FetchPosts { seq: u64, query: PostQuery },
    FetchPost { seq: u64, id: u64 },
    FetchComments { seq: u64, post_id: u64 },
    FetchTags,
    CreatePost(PostCreateRequest),
    UpdatePost { id: u64, req: PostUpdateRequest },
    DeletePost { id: u64 },
    UpdatePostStatus { id: u64, status: PostStatus },
    CreateComment { post_id: u64, content: String },
    UpdateComment { id: u64, post_id: u64, content: String },
    DeleteComment { id: u64, post_id: u64 },
    UpdateProfile { nickname: String },
    FetchMyPosts { seq: u64, page: u32, size: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created,
    Updated,
    Deleted,
}

/// Results delivered back from the API task.
#[derive(Debug)]
pub enum AppEvent {
    MeLoaded(Result<MemberResponse, ApiError>),
    LoginDone(Result<LoginResponse, ApiError>),
    SignupDone(Result<LoginResponse, ApiError>),
    PostsLoaded { seq: u64, result: Result<PageResponse<PostListResponse>, ApiError> },
    PostLoaded { seq: u64, result: Result<PostResponse, ApiError> },
    CommentsLoaded { seq: u64, post_id: u64, result: Result<Vec<CommentResponse>, ApiError> },
    TagsLoaded(Result<Vec<TagResponse>, ApiError>),
    PostCreated(Result<PostResponse, ApiError>),
    PostUpdated(Result<PostResponse, ApiError>),
    PostDeleted(Result<(), ApiError>),
    StatusUpdated(Result<PostResponse, ApiError>),
    CommentMutated { action: CommentAction, post_id: u64, result: Result<(), ApiError> },
    ProfileUpdated(Result<MemberResponse, ApiError>),
    MyPostsLoaded { seq: u64, result: Result<PageResponse<PostListResponse>, ApiError> },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Board,
    Detail(u64),
    NewPost,
    EditPost(u64),
    Login,
    Signup,
    MyPage,
}

/// Which text input currently captures keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    None,
    BoardKeyword,
    AuthForm,
    PostForm,
    Comment,
    Nickname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Unsolved,
    Solved,
}

impl StatusFilter {
    pub fn cycle(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Unsolved,
            StatusFilter::Unsolved => StatusFilter::Solved,
            StatusFilter::Solved => StatusFilter::All,
        }
    }

    pub fn as_status(self) -> Option<PostStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Unsolved => Some(PostStatus::Unsolved),
            StatusFilter::Solved => Some(PostStatus::Solved),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "전체",
            StatusFilter::Unsolved => "미해결",
            StatusFilter::Solved => "해결됨",
        }
    }
}

#[derive(Default)]
pub struct BoardState {
    pub loading: bool,
    pub error: Option<String>,
    pub page: Option<PageResponse<PostListResponse>>,
    pub selected: usize,
    pub filter: StatusFilter,
    pub keyword: String,
    pub keyword_input: String,
    pub editing_keyword: bool,
    pub page_index: u32,
    last_seq: u64,
}

pub struct DetailState {
    pub post_id: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub post: Option<PostResponse>,
    pub segments: Vec<Segment>,
    pub comments: Vec<CommentResponse>,
    pub selected_comment: usize,
    pub selected_block: usize,
    pub copied: HashMap<usize, Instant>,
    pub comment_input: String,
    pub composing: bool,
    pub editing_comment: Option<u64>,
    pub comment_error: Option<String>,
    post_seq: u64,
    comments_seq: u64,
}

impl DetailState {
    fn new(post_id: u64) -> Self {
        Self {
            post_id,
            loading: true,
            error: None,
            post: None,
            segments: Vec::new(),
            comments: Vec::new(),
            selected_comment: 0,
            selected_block: 0,
            copied: HashMap::new(),
            comment_input: String::new(),
            composing: false,
            editing_comment: None,
            comment_error: None,
            post_seq: 0,
            comments_seq: 0,
        }
    }

    fn set_post(&mut self, post: PostResponse) {
        self.segments = parse_content(&post.content);
        self.selected_block = 0;
        self.copied.clear();
        self.post = Some(post);
        self.loading = false;
        self.error = None;
    }

    pub fn code_block_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Code { .. }))
            .count()
    }

    /// Body of the n-th code block, for the copy action.
    pub fn code_block_body(&self, n: usize) -> Option<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Code { body, .. } => Some(body.as_str()),
                _ => None,
            })
            .nth(n)
    }

    pub fn block_copied_recently(&self, n: usize) -> bool {
        self.copied
            .get(&n)
            .is_some_and(|at| at.elapsed() < COPIED_TTL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
    Tags,
}

#[derive(Default)]
pub struct PostFormState {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<u64>,
    pub tags: Vec<TagResponse>,
    pub tags_loading: bool,
    pub field: FormField,
    pub tag_cursor: usize,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Nickname,
    Password,
}

#[derive(Default)]
pub struct AuthFormState {
    pub nickname: String,
    pub password: String,
    pub field: AuthField,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Default)]
pub struct MyPageState {
    pub nickname_input: String,
    pub editing_nickname: bool,
    pub nick_error: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: Option<PageResponse<PostListResponse>>,
    pub selected: usize,
    pub page_index: u32,
    last_seq: u64,
}

/// Destructive actions go through an explicit confirmation overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePost(u64),
    DeleteComment { id: u64, post_id: u64 },
}

impl ConfirmAction {
    pub fn message(&self) -> &'static str {
        match self {
            ConfirmAction::DeletePost(_) => "게시글을 삭제하시겠습니까?",
            ConfirmAction::DeleteComment { .. } => "댓글을 삭제하시겠습니까?",
        }
    }
}

pub struct App {
    quit: bool,
    route: Route,
    pub session: Session,
    cmd_tx: UnboundedSender<ApiCmd>,
    page_size: u32,
    mypage_size: u32,
    fps: u32,
    seq: u64,
    toast: Option<(String, Instant)>,
    confirm: Option<ConfirmAction>,

    pub board: BoardState,
    pub detail: DetailState,
    pub form: PostFormState,
    pub auth: AuthFormState,
    pub mypage: MyPageState,
}

impl App {
    pub fn new(
        session: Session,
        cmd_tx: UnboundedSender<ApiCmd>,
        page_size: u32,
        mypage_size: u32,
        fps: u32,
    ) -> Self {
        Self {
            quit: false,
            route: Route::Board,
            session,
            cmd_tx,
            page_size,
            mypage_size,
            fps,
            seq: 0,
            toast: None,
            confirm: None,
            board: BoardState::default(),
            detail: DetailState::new(0),
            form: PostFormState::default(),
            auth: AuthFormState::default(),
            mypage: MyPageState::default(),
        }
    }

    // ----- getters -----

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn quit_flag(&self) -> bool {
        self.quit
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn confirm(&self) -> Option<ConfirmAction> {
        self.confirm
    }

    pub fn toast(&self) -> Option<&str> {
        match &self.toast {
            Some((msg, at)) if at.elapsed() < TOAST_TTL => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now()));
    }

    /// Expired toasts are pruned once per frame.
    pub fn tick(&mut self) {
        if let Some((_, at)) = &self.toast {
            if at.elapsed() >= TOAST_TTL {
                self.toast = None;
            }
        }
        self.detail.copied.retain(|_, at| at.elapsed() < COPIED_TTL);
    }

    pub fn edit_target(&self) -> EditTarget {
        if self.confirm.is_some() {
            return EditTarget::None;
        }
        match self.route {
            Route::Board if self.board.editing_keyword => EditTarget::BoardKeyword,
            Route::Login | Route::Signup => EditTarget::AuthForm,
            Route::NewPost | Route::EditPost(_) => EditTarget::PostForm,
            Route::Detail(_) if self.detail.composing => EditTarget::Comment,
            Route::MyPage if self.mypage.editing_nickname => EditTarget::Nickname,
            _ => EditTarget::None,
        }
    }

    fn send(&self, cmd: ApiCmd) {
        let _ = self.cmd_tx.send(cmd);
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    // ----- startup -----

    /// Kick off session restore; called once from main before the loop.
    pub fn bootstrap(&mut self) {
        if self.session.begin_bootstrap() {
            self.send(ApiCmd::FetchMe);
        }
        self.goto_board();
    }

    // ----- navigation (every entry re-fetches; nothing is cached) -----

    pub fn goto_board(&mut self) {
        self.route = Route::Board;
        self.board.editing_keyword = false;
        self.load_posts();
    }

    pub fn goto_detail(&mut self, id: u64) {
        self.route = Route::Detail(id);
        self.detail = DetailState::new(id);
        let seq = self.next_seq();
        self.detail.post_seq = seq;
        self.send(ApiCmd::FetchPost { seq, id });
        self.reload_comments(id);
    }

    pub fn goto_new_post(&mut self) {
        if !self.require_auth() {
            return;
        }
        self.route = Route::NewPost;
        self.form = PostFormState::default();
        self.load_tags();
    }

    pub fn goto_edit_post(&mut self) {
        let Some(post) = self.detail.post.clone() else {
            return;
        };
        if self.session.member_id() != Some(post.member.id) {
            return;
        }
        self.route = Route::EditPost(post.id);
        self.form = PostFormState {
            title: post.title,
            content: post.content,
            tag_ids: post.tags.iter().map(|t| t.id).collect(),
            ..PostFormState::default()
        };
        self.load_tags();
    }

    pub fn goto_login(&mut self) {
        self.route = Route::Login;
        self.auth = AuthFormState::default();
    }

    pub fn goto_signup(&mut self) {
        self.route = Route::Signup;
        self.auth = AuthFormState::default();
    }

    pub fn goto_mypage(&mut self) {
        if !self.require_auth() {
            return;
        }
        self.route = Route::MyPage;
        self.mypage = MyPageState {
            nickname_input: self
                .session
                .member()
                .map(|m| m.nickname.clone())
                .unwrap_or_default(),
            ..MyPageState::default()
        };
        self.load_my_posts();
    }

    /// Esc / back: fall back to the board from any leaf view.
    pub fn go_back(&mut self) {
        match self.route {
            Route::EditPost(id) => self.goto_detail(id),
            Route::Board => {}
            _ => self.goto_board(),
        }
    }

    fn require_auth(&mut self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.show_toast("로그인이 필요합니다.");
        self.goto_login();
        false
    }

    // ----- fetches -----

    fn load_posts(&mut self) {
        let seq = self.next_seq();
        self.board.last_seq = seq;
        self.board.loading = true;
        self.board.error = None;
        let keyword = (!self.board.keyword.is_empty()).then(|| self.board.keyword.clone());
        let query = PostQuery {
            page: self.board.page_index,
            size: self.page_size,
            status: self.board.filter.as_status(),
            keyword,
        };
        self.send(ApiCmd::FetchPosts { seq, query });
    }

    fn reload_comments(&mut self, post_id: u64) {
        let seq = self.next_seq();
        self.detail.comments_seq = seq;
        self.send(ApiCmd::FetchComments { seq, post_id });
    }

    fn load_tags(&mut self) {
        self.form.tags_loading = true;
        self.send(ApiCmd::FetchTags);
    }

    fn load_my_posts(&mut self) {
        let seq = self.next_seq();
        self.mypage.last_seq = seq;
        self.mypage.loading = true;
        self.mypage.error = None;
        self.send(ApiCmd::FetchMyPosts {
            seq,
            page: self.mypage.page_index,
            size: self.mypage_size,
        });
    }

    // ----- board intents -----

    pub fn board_up(&mut self) {
        self.board.selected = self.board.selected.saturating_sub(1);
    }

    pub fn board_down(&mut self) {
        let len = self.board.page.as_ref().map_or(0, |p| p.content.len());
        if len > 0 && self.board.selected + 1 < len {
            self.board.selected += 1;
        }
    }

    pub fn board_open_selected(&mut self) {
        if let Some(id) = self
            .board
            .page
            .as_ref()
            .and_then(|p| p.content.get(self.board.selected))
            .map(|row| row.id)
        {
            self.goto_detail(id);
        }
    }

    pub fn board_next_page(&mut self) {
        if self.board.page.as_ref().is_some_and(|p| p.has_next) {
            self.board.page_index += 1;
            self.board.selected = 0;
            self.load_posts();
        }
    }

    pub fn board_prev_page(&mut self) {
        if self.board.page.as_ref().is_some_and(|p| p.has_previous) {
            self.board.page_index = self.board.page_index.saturating_sub(1);
            self.board.selected = 0;
            self.load_posts();
        }
    }

    pub fn board_cycle_filter(&mut self) {
        self.board.filter = self.board.filter.cycle();
        self.board.page_index = 0;
        self.board.selected = 0;
        self.load_posts();
    }

    pub fn board_start_search(&mut self) {
        self.board.editing_keyword = true;
        self.board.keyword_input = self.board.keyword.clone();
    }

    pub fn refresh(&mut self) {
        match self.route {
            Route::Board => self.load_posts(),
            Route::Detail(id) => self.goto_detail(id),
            Route::MyPage => self.load_my_posts(),
            _ => {}
        }
    }

    // ----- detail intents -----

    pub fn detail_comment_up(&mut self) {
        self.detail.selected_comment = self.detail.selected_comment.saturating_sub(1);
    }

    pub fn detail_comment_down(&mut self) {
        let len = self.detail.comments.len();
        if len > 0 && self.detail.selected_comment + 1 < len {
            self.detail.selected_comment += 1;
        }
    }

    pub fn detail_prev_block(&mut self) {
        self.detail.selected_block = self.detail.selected_block.saturating_sub(1);
    }

    pub fn detail_next_block(&mut self) {
        let count = self.detail.code_block_count();
        if count > 0 && self.detail.selected_block + 1 < count {
            self.detail.selected_block += 1;
        }
    }

    /// Trimmed body of the selected code block, if any.
    pub fn copy_block_payload(&self) -> Option<String> {
        self.detail
            .code_block_body(self.detail.selected_block)
            .map(|b| b.trim().to_string())
    }

    pub fn mark_block_copied(&mut self) {
        self.detail
            .copied
            .insert(self.detail.selected_block, Instant::now());
    }

    pub fn is_post_author(&self) -> bool {
        match (&self.detail.post, self.session.member_id()) {
            (Some(post), Some(id)) => post.member.id == id,
            _ => false,
        }
    }

    /// One PATCH per toggle, carrying the opposite of the current status.
    pub fn toggle_post_status(&mut self) {
        if !self.is_post_author() {
            return;
        }
        if let Some(post) = &self.detail.post {
            self.send(ApiCmd::UpdatePostStatus {
                id: post.id,
                status: post.post_status.toggled(),
            });
        }
    }

    pub fn request_delete_post(&mut self) {
        if self.is_post_author() {
            if let Some(post) = &self.detail.post {
                self.confirm = Some(ConfirmAction::DeletePost(post.id));
            }
        }
    }

    pub fn detail_start_comment(&mut self) {
        if !self.require_auth() {
            return;
        }
        self.detail.composing = true;
        self.detail.editing_comment = None;
        self.detail.comment_input.clear();
        self.detail.comment_error = None;
    }

    fn selected_comment(&self) -> Option<&CommentResponse> {
        self.detail.comments.get(self.detail.selected_comment)
    }

    fn owns_selected_comment(&self) -> bool {
        match (self.selected_comment(), self.session.member_id()) {
            (Some(c), Some(id)) => c.member.id == id,
            _ => false,
        }
    }

    pub fn detail_edit_selected_comment(&mut self) {
        if !self.owns_selected_comment() {
            return;
        }
        let Some((id, content)) = self.selected_comment().map(|c| (c.id, c.content.clone()))
        else {
            return;
        };
        self.detail.editing_comment = Some(id);
        self.detail.comment_input = content;
        self.detail.composing = true;
        self.detail.comment_error = None;
    }

    pub fn request_delete_selected_comment(&mut self) {
        if !self.owns_selected_comment() {
            return;
        }
        if let Some(id) = self.selected_comment().map(|c| c.id) {
            self.confirm = Some(ConfirmAction::DeleteComment {
                id,
                post_id: self.detail.post_id,
            });
        }
    }

    // ----- confirmation overlay -----

    pub fn confirm_accept(&mut self) {
        match self.confirm.take() {
            Some(ConfirmAction::DeletePost(id)) => self.send(ApiCmd::DeletePost { id }),
            Some(ConfirmAction::DeleteComment { id, post_id }) => {
                self.send(ApiCmd::DeleteComment { id, post_id })
            }
            None => {}
        }
    }

    pub fn confirm_dismiss(&mut self) {
        self.confirm = None;
    }

    // ----- mypage intents -----

    pub fn mypage_up(&mut self) {
        self.mypage.selected = self.mypage.selected.saturating_sub(1);
    }

    pub fn mypage_down(&mut self) {
        let len = self.mypage.page.as_ref().map_or(0, |p| p.content.len());
        if len > 0 && self.mypage.selected + 1 < len {
            self.mypage.selected += 1;
        }
    }

    pub fn mypage_open_selected(&mut self) {
        if let Some(id) = self
            .mypage
            .page
            .as_ref()
            .and_then(|p| p.content.get(self.mypage.selected))
            .map(|row| row.id)
        {
            self.goto_detail(id);
        }
    }

    pub fn mypage_next_page(&mut self) {
        if self.mypage.page.as_ref().is_some_and(|p| p.has_next) {
            self.mypage.page_index += 1;
            self.mypage.selected = 0;
            self.load_my_posts();
        }
    }

    pub fn mypage_prev_page(&mut self) {
        if self.mypage.page.as_ref().is_some_and(|p| p.has_previous) {
            self.mypage.page_index = self.mypage.page_index.saturating_sub(1);
            self.mypage.selected = 0;
            self.load_my_posts();
        }
    }

    pub fn mypage_start_nickname_edit(&mut self) {
        self.mypage.editing_nickname = true;
        self.mypage.nick_error = None;
        self.mypage.nickname_input = self
            .session
            .member()
            .map(|m| m.nickname.clone())
            .unwrap_or_default();
    }

    // ----- auth intents -----

    pub fn logout(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        self.session.clear();
        self.show_toast("로그아웃되었습니다.");
        self.goto_board();
    }

    // ----- text input routing -----

    pub fn input_char(&mut self, c: char) {
        match self.edit_target() {
            EditTarget::BoardKeyword => self.board.keyword_input.push(c),
            EditTarget::AuthForm => match self.auth.field {
                AuthField::Nickname => self.auth.nickname.push(c),
                AuthField::Password => self.auth.password.push(c),
            },
            EditTarget::PostForm => match self.form.field {
                FormField::Title => self.form.title.push(c),
                FormField::Content => self.form.content.push(c),
                FormField::Tags => {
                    if c == ' ' {
                        self.form_toggle_tag();
                    }
                }
            },
            EditTarget::Comment => self.detail.comment_input.push(c),
            EditTarget::Nickname => self.mypage.nickname_input.push(c),
            EditTarget::None => {}
        }
    }

    pub fn input_backspace(&mut self) {
        match self.edit_target() {
            EditTarget::BoardKeyword => {
                self.board.keyword_input.pop();
            }
            EditTarget::AuthForm => {
                match self.auth.field {
                    AuthField::Nickname => self.auth.nickname.pop(),
                    AuthField::Password => self.auth.password.pop(),
                };
            }
            EditTarget::PostForm => {
                match self.form.field {
                    FormField::Title => self.form.title.pop(),
                    FormField::Content => self.form.content.pop(),
                    FormField::Tags => None,
                };
            }
            EditTarget::Comment => {
                self.detail.comment_input.pop();
            }
            EditTarget::Nickname => {
                self.mypage.nickname_input.pop();
            }
            EditTarget::None => {}
        }
    }

    /// Enter: submit single-line inputs, insert a newline in multiline ones.
    pub fn input_enter(&mut self) {
        match self.edit_target() {
            EditTarget::BoardKeyword => self.apply_keyword(),
            EditTarget::AuthForm => self.submit_auth(),
            EditTarget::PostForm => match self.form.field {
                FormField::Content => self.form.content.push('\n'),
                FormField::Title => self.form.field = FormField::Content,
                FormField::Tags => self.form_toggle_tag(),
            },
            EditTarget::Comment => self.detail.comment_input.push('\n'),
            EditTarget::Nickname => self.submit_nickname(),
            EditTarget::None => {}
        }
    }

    pub fn input_tab(&mut self) {
        match self.edit_target() {
            EditTarget::AuthForm => {
                self.auth.field = match self.auth.field {
                    AuthField::Nickname => AuthField::Password,
                    AuthField::Password => AuthField::Nickname,
                };
            }
            EditTarget::PostForm => {
                self.form.field = match self.form.field {
                    FormField::Title => FormField::Content,
                    FormField::Content => FormField::Tags,
                    FormField::Tags => FormField::Title,
                };
            }
            _ => {}
        }
    }

    pub fn input_esc(&mut self) {
        match self.edit_target() {
            EditTarget::BoardKeyword => {
                self.board.editing_keyword = false;
            }
            EditTarget::AuthForm => self.goto_board(),
            EditTarget::PostForm => self.go_back(),
            EditTarget::Comment => {
                self.detail.composing = false;
                self.detail.editing_comment = None;
                self.detail.comment_input.clear();
                self.detail.comment_error = None;
            }
            EditTarget::Nickname => {
                self.mypage.editing_nickname = false;
                self.mypage.nick_error = None;
            }
            EditTarget::None => {}
        }
    }

    /// Ctrl+S: submit whichever multiline form is open.
    pub fn input_submit(&mut self) {
        match self.edit_target() {
            EditTarget::PostForm => self.submit_post_form(),
            EditTarget::Comment => self.submit_comment(),
            _ => {}
        }
    }

    pub fn form_tag_left(&mut self) {
        self.form.tag_cursor = self.form.tag_cursor.saturating_sub(1);
    }

    pub fn form_tag_right(&mut self) {
        if !self.form.tags.is_empty() && self.form.tag_cursor + 1 < self.form.tags.len() {
            self.form.tag_cursor += 1;
        }
    }

    fn form_toggle_tag(&mut self) {
        if let Some(tag) = self.form.tags.get(self.form.tag_cursor) {
            if let Some(pos) = self.form.tag_ids.iter().position(|id| *id == tag.id) {
                self.form.tag_ids.remove(pos);
            } else {
                self.form.tag_ids.push(tag.id);
            }
        }
    }

    // ----- submissions (client-side validation gates the network) -----

    fn apply_keyword(&mut self) {
        self.board.keyword = self.board.keyword_input.trim().to_string();
        self.board.editing_keyword = false;
        self.board.page_index = 0;
        self.board.selected = 0;
        self.load_posts();
    }

    fn submit_auth(&mut self) {
        if self.auth.submitting {
            return;
        }
        self.auth.error = None;
        if let Err(msg) = validate::validate_nickname(&self.auth.nickname) {
            self.auth.error = Some(msg);
            return;
        }
        if let Err(msg) = validate::validate_password(&self.auth.password) {
            self.auth.error = Some(msg);
            return;
        }
        self.auth.submitting = true;
        let nickname = self.auth.nickname.clone();
        let password = self.auth.password.clone();
        match self.route {
            Route::Signup => self.send(ApiCmd::Signup { nickname, password }),
            _ => self.send(ApiCmd::Login { nickname, password }),
        }
    }

    fn submit_post_form(&mut self) {
        if self.form.submitting {
            return;
        }
        self.form.error = None;
        if let Err(msg) =
            validate::validate_post_form(&self.form.title, &self.form.content, &self.form.tag_ids)
        {
            self.form.error = Some(msg);
            return;
        }
        self.form.submitting = true;
        match self.route {
            Route::EditPost(id) => self.send(ApiCmd::UpdatePost {
                id,
                req: PostUpdateRequest {
                    title: self.form.title.clone(),
                    content: self.form.content.clone(),
                    tag_ids: self.form.tag_ids.clone(),
                },
            }),
            _ => self.send(ApiCmd::CreatePost(PostCreateRequest {
                title: self.form.title.clone(),
                content: self.form.content.clone(),
                tag_ids: self.form.tag_ids.clone(),
            })),
        }
    }

    fn submit_comment(&mut self) {
        self.detail.comment_error = None;
        if let Err(msg) = validate::validate_comment(&self.detail.comment_input) {
            self.detail.comment_error = Some(msg);
            return;
        }
        let content = self.detail.comment_input.clone();
        match self.detail.editing_comment {
            Some(id) => self.send(ApiCmd::UpdateComment {
                id,
                post_id: self.detail.post_id,
                content,
            }),
            None => self.send(ApiCmd::CreateComment {
                post_id: self.detail.post_id,
                content,
            }),
        }
    }

    fn submit_nickname(&mut self) {
        self.mypage.nick_error = None;
        let nickname = self.mypage.nickname_input.trim().to_string();
        if let Err(msg) = validate::validate_nickname(&nickname) {
            self.mypage.nick_error = Some(msg);
            return;
        }
        self.send(ApiCmd::UpdateProfile { nickname });
    }

    // ----- event application -----

    pub fn on_event(&mut self, event: AppEvent) {
        // Session expiry wins over everything else, including staleness:
        // any 401 — except the bootstrap probe — clears the session and
        // lands on login, no matter which page issued the call.
        if !matches!(event, AppEvent::MeLoaded(_)) {
            if let Some(e) = event_error(&event) {
                if e.is_unauthenticated() {
                    self.expire_session();
                    return;
                }
            }
        }

        match event {
            AppEvent::Quit => self.quit = true,

            // Bootstrap failure is not a redirect: a stale token just means
            // anonymous (the user never asked for a protected page yet).
            AppEvent::MeLoaded(Ok(member)) => self.session.resolve(member),
            AppEvent::MeLoaded(Err(_)) => self.session.clear(),

            AppEvent::LoginDone(result) | AppEvent::SignupDone(result) => {
                self.auth.submitting = false;
                match result {
                    Ok(login) => {
                        self.session.establish(login);
                        self.goto_board();
                    }
                    Err(e) => self.auth.error = Some(e.user_message()),
                }
            }

            AppEvent::PostsLoaded { seq, result } => {
                if seq != self.board.last_seq {
                    return; // response outlived its view; drop it
                }
                self.board.loading = false;
                match result {
                    Ok(page) => {
                        let len = page.content.len();
                        if self.board.selected >= len {
                            self.board.selected = len.saturating_sub(1);
                        }
                        self.board.page = Some(page);
                    }
                    Err(e) => {
                        self.board.page = None;
                        self.board.error = Some(e.user_message());
                    }
                }
            }

            AppEvent::PostLoaded { seq, result } => {
                if seq != self.detail.post_seq {
                    return;
                }
                match result {
                    Ok(post) => self.detail.set_post(post),
                    Err(e) => {
                        self.detail.loading = false;
                        self.detail.error = Some(e.user_message());
                    }
                }
            }

            AppEvent::CommentsLoaded { seq, post_id, result } => {
                if seq != self.detail.comments_seq || post_id != self.detail.post_id {
                    return;
                }
                match result {
                    Ok(comments) => {
                        let len = comments.len();
                        if self.detail.selected_comment >= len {
                            self.detail.selected_comment = len.saturating_sub(1);
                        }
                        self.detail.comments = comments;
                    }
                    Err(_) => {
                        // comment list failures stay quiet; compose still works
                    }
                }
            }

            AppEvent::TagsLoaded(result) => {
                self.form.tags_loading = false;
                match result {
                    Ok(tags) => self.form.tags = tags,
                    Err(e) => {
                        self.form.error = Some(e.user_message());
                    }
                }
            }

            AppEvent::PostCreated(result) | AppEvent::PostUpdated(result) => {
                self.form.submitting = false;
                match result {
                    Ok(post) => {
                        let id = post.id;
                        self.goto_detail(id);
                        // Seed the view from the response; the in-flight
                        // re-fetch will confirm it.
                        self.detail.set_post(post);
                    }
                    Err(e) => {
                        self.form.error = Some(e.user_message());
                    }
                }
            }

            AppEvent::PostDeleted(result) => match result {
                Ok(()) => {
                    self.show_toast("게시글이 삭제되었습니다.");
                    self.goto_board();
                }
                Err(e) => {
                    self.show_toast(e.user_message());
                }
            },

            AppEvent::StatusUpdated(result) => match result {
                Ok(post) => {
                    if self.detail.post_id == post.id {
                        self.detail.set_post(post);
                    }
                }
                Err(_) => {
                    self.show_toast("상태 변경에 실패했습니다.");
                }
            },

            AppEvent::CommentMutated { action, post_id, result } => match result {
                Ok(()) => {
                    self.detail.composing = false;
                    self.detail.editing_comment = None;
                    self.detail.comment_input.clear();
                    if action == CommentAction::Deleted {
                        self.detail.selected_comment = 0;
                    }
                    if self.detail.post_id == post_id {
                        self.reload_comments(post_id);
                    }
                }
                Err(e) => {
                    match action {
                        CommentAction::Deleted => self.show_toast("삭제에 실패했습니다."),
                        _ => self.detail.comment_error = Some(e.user_message()),
                    }
                }
            },

            AppEvent::ProfileUpdated(result) => match result {
                Ok(member) => {
                    self.session.update_user(member);
                    self.mypage.editing_nickname = false;
                    self.show_toast("닉네임이 변경되었습니다.");
                }
                Err(e) => {
                    self.mypage.nick_error = Some(e.user_message());
                }
            },

            AppEvent::MyPostsLoaded { seq, result } => {
                if seq != self.mypage.last_seq {
                    return;
                }
                self.mypage.loading = false;
                match result {
                    Ok(page) => {
                        let len = page.content.len();
                        if self.mypage.selected >= len {
                            self.mypage.selected = len.saturating_sub(1);
                        }
                        self.mypage.page = Some(page);
                    }
                    Err(e) => {
                        self.mypage.error = Some(e.user_message());
                    }
                }
            }
        }
    }

    /// The single 401 coordinator: clear the session (including the persisted
    /// token) and land on the login view, regardless of the issuing page.
    fn expire_session(&mut self) {
        self.session.clear();
        self.goto_login();
        self.show_toast("인증이 만료되었습니다. 다시 로그인해주세요.");
    }
}

fn event_error(event: &AppEvent) -> Option<&ApiError> {
    match event {
        AppEvent::MeLoaded(r) => r.as_ref().err(),
        AppEvent::LoginDone(r) | AppEvent::SignupDone(r) => r.as_ref().err(),
        AppEvent::PostsLoaded { result, .. } | AppEvent::MyPostsLoaded { result, .. } => {
            result.as_ref().err()
        }
        AppEvent::PostLoaded { result, .. }
        | AppEvent::PostCreated(result)
        | AppEvent::PostUpdated(result)
        | AppEvent::StatusUpdated(result) => result.as_ref().err(),
        AppEvent::CommentsLoaded { result, .. } => result.as_ref().err(),
        AppEvent::TagsLoaded(result) => result.as_ref().err(),
        AppEvent::PostDeleted(result) | AppEvent::CommentMutated { result, .. } => {
            result.as_ref().err()
        }
        AppEvent::ProfileUpdated(result) => result.as_ref().err(),
        AppEvent::Quit => None,
    }
}
