use crate::app::{App, AuthField, EditTarget, FormField, Route};
use crate::content::Segment;
use crate::models::{fmt_timestamp, PostStatus, TagCategory};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const DANGER: Color = Color::Red;
const SOLVED: Color = Color::Green;
const UNSOLVED: Color = Color::Yellow;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    header(f, chunks[0], app);
    match app.route() {
        Route::Board => board(f, chunks[1], app),
        Route::Detail(_) => detail(f, chunks[1], app),
        Route::NewPost | Route::EditPost(_) => post_form(f, chunks[1], app),
        Route::Login | Route::Signup => auth_form(f, chunks[1], app),
        Route::MyPage => mypage(f, chunks[1], app),
    }
    footer(f, chunks[2], app);

    // Overlays render last
    if app.confirm().is_some() {
        draw_confirm_modal(f, app);
    }
    if app.toast().is_some() {
        draw_toast(f, app);
    }
}

// ===============================
// Header / Footer
// ===============================
fn header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.route() {
        Route::Board => "게시글",
        Route::Detail(_) => "게시글 상세",
        Route::NewPost => "새 리뷰 작성",
        Route::EditPost(_) => "리뷰 수정",
        Route::Login => "로그인",
        Route::Signup => "회원가입",
        Route::MyPage => "마이페이지",
    };

    let identity = if app.session.is_loading() {
        Span::styled("세션 확인 중...", Style::default().fg(MUTED))
    } else if let Some(member) = app.session.member() {
        Span::styled(
            format!("{} 님", member.nickname),
            Style::default().fg(ACCENT),
        )
    } else {
        Span::styled("로그인하지 않음", Style::default().fg(MUTED))
    };

    let line = Line::from(vec![
        Span::styled(" revu ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        identity,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn footer(f: &mut Frame, area: Rect, app: &App) {
    let hints: &str = if app.confirm().is_some() {
        "y 확인 │ n/Esc 취소"
    } else {
        match (app.route(), app.edit_target()) {
            (_, EditTarget::BoardKeyword) => "Enter 검색 │ Esc 취소",
            (_, EditTarget::AuthForm) => "Tab 다음 필드 │ Enter 제출 │ Esc 돌아가기",
            (_, EditTarget::PostForm) => {
                "Tab 다음 필드 │ Space 태그 선택 │ Ctrl+S 제출 │ Esc 취소"
            }
            (_, EditTarget::Comment) => "Ctrl+S 등록 │ Esc 취소",
            (_, EditTarget::Nickname) => "Enter 저장 │ Esc 취소",
            (Route::Board, _) => {
                "↑↓ 이동 │ Enter 열기 │ ←→ 페이지 │ f 필터 │ / 검색 │ w 글쓰기 │ m 마이페이지 │ q 종료"
            }
            (Route::Detail(_), _) => {
                "↑↓ 댓글 │ [] 코드블록 │ y 복사 │ c 댓글쓰기 │ e/d 수정/삭제 │ t 상태 │ Esc 목록"
            }
            (Route::MyPage, _) => "↑↓ 이동 │ Enter 열기 │ ←→ 페이지 │ n 닉네임 수정 │ Esc 목록",
            _ => "Esc 돌아가기 │ q 종료",
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(MUTED)))),
        area,
    );
}

// ===============================
// Board
// ===============================
fn board(f: &mut Frame, area: Rect, app: &mut App) {
    let search_expanded = app.board.editing_keyword || !app.board.keyword.is_empty();
    let mut constraints: Vec<Constraint> = Vec::with_capacity(3);
    constraints.push(Constraint::Length(1)); // filter line
    if search_expanded {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    filter_line(f, chunks[0], app);
    let mut idx = 1;
    if search_expanded {
        search_bar(f, chunks[idx], app);
        idx += 1;
    }
    post_list(f, chunks[idx], app);
}

fn filter_line(f: &mut Frame, area: Rect, app: &App) {
    use crate::app::StatusFilter;
    let mut spans = vec![Span::styled("상태: ", Style::default().fg(MUTED))];
    for (i, filter) in [StatusFilter::All, StatusFilter::Unsolved, StatusFilter::Solved]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if app.board.filter == filter {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        spans.push(Span::styled(filter.label(), style));
    }
    if !app.board.keyword.is_empty() {
        spans.push(Span::styled(
            format!("   검색: {}", app.board.keyword),
            Style::default().fg(ACCENT),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn search_bar(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.board.editing_keyword;
    let text = if focused {
        app.board.keyword_input.as_str()
    } else {
        app.board.keyword.as_str()
    };
    let border = if focused { ACCENT } else { MUTED };
    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title("검색어"),
    );
    f.render_widget(input, area);
}

fn post_list(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(pager_title(app.board.page.as_ref()));

    if app.board.loading {
        f.render_widget(
            Paragraph::new("로딩 중...").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }
    if let Some(err) = &app.board.error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(DANGER)).block(block),
            area,
        );
        return;
    }

    let Some(page) = &app.board.page else {
        f.render_widget(Paragraph::new("게시글이 없습니다.").block(block), area);
        return;
    };
    if page.content.is_empty() {
        f.render_widget(
            Paragraph::new("게시글이 없습니다.").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = page.content.iter().map(post_row).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Indexed(236)).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(app.board.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn post_row(row: &crate::models::PostListResponse) -> ListItem<'_> {
    let status_style = match row.status {
        PostStatus::Solved => Style::default().fg(SOLVED),
        PostStatus::Unsolved => Style::default().fg(UNSOLVED),
    };
    let tags = row
        .tags
        .iter()
        .map(|t| format!("#{}", t.name))
        .collect::<Vec<_>>()
        .join(" ");
    ListItem::new(Line::from(vec![
        Span::styled(format!("[{}] ", row.status.label()), status_style),
        Span::raw(row.title.clone()),
        Span::styled(format!(" 댓글 {}", row.comment_count), Style::default().fg(MUTED)),
        Span::raw("  "),
        Span::styled(tags, Style::default().fg(ACCENT)),
        Span::styled(
            format!("  {} · {}", row.member.nickname, fmt_timestamp(row.updated_at)),
            Style::default().fg(MUTED),
        ),
    ]))
}

fn pager_title(page: Option<&crate::models::PageResponse<crate::models::PostListResponse>>) -> String {
    match page {
        Some(p) if p.total_pages > 1 => {
            let numbers = p
                .page_numbers()
                .iter()
                .map(|n| {
                    if *n == p.page {
                        format!("[{}]", n + 1)
                    } else {
                        format!("{}", n + 1)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!(" {} / {}쪽 · {} · 총 {}건 ", p.page + 1, p.total_pages, numbers, p.total_elements)
        }
        Some(p) => format!(" 총 {}건 ", p.total_elements),
        None => String::new(),
    }
}

// ===============================
// Post detail
// ===============================
fn detail(f: &mut Frame, area: Rect, app: &mut App) {
    if app.detail.loading {
        f.render_widget(
            Paragraph::new("로딩 중...").style(Style::default().fg(MUTED)),
            area,
        );
        return;
    }
    if let Some(err) = &app.detail.error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(DANGER)),
            area,
        );
        return;
    }
    let Some(post) = &app.detail.post else {
        f.render_widget(
            Paragraph::new("게시글을 찾을 수 없습니다.").style(Style::default().fg(DANGER)),
            area,
        );
        return;
    };

    let composing = app.detail.composing;
    let mut constraints: Vec<Constraint> = vec![
        Constraint::Length(2),                // title + meta
        Constraint::Min(6),                   // content
        Constraint::Length(comment_height(app)), // comments
    ];
    if composing {
        constraints.push(Constraint::Length(4));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // Title + meta
    let status_style = match post.post_status {
        PostStatus::Solved => Style::default().fg(SOLVED),
        PostStatus::Unsolved => Style::default().fg(UNSOLVED),
    };
    let tags = post
        .tags
        .iter()
        .map(|t| format!("#{}", t.name))
        .collect::<Vec<_>>()
        .join(" ");
    let title_lines = vec![
        Line::from(vec![
            Span::styled(format!("[{}] ", post.post_status.label()), status_style),
            Span::styled(post.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} · {}  ", post.member.nickname, fmt_timestamp(post.created_at)),
                Style::default().fg(MUTED),
            ),
            Span::styled(tags, Style::default().fg(ACCENT)),
        ]),
    ];
    f.render_widget(Paragraph::new(title_lines), chunks[0]);

    // Content segments
    let lines = segment_lines(app);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(MUTED)),
        ),
        chunks[1],
    );

    comments(f, chunks[2], app);

    if composing {
        comment_compose(f, chunks[3], app);
    }
}

fn comment_height(app: &App) -> u16 {
    // Comment pane grows with content but never swallows the body
    let len = app.detail.comments.len() as u16;
    (len + 3).clamp(4, 10)
}

/// Flatten parsed segments into styled lines. Code blocks carry their label,
/// a selection marker, and the transient "복사됨" acknowledgment.
fn segment_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    let mut block_idx = 0usize;

    for segment in &app.detail.segments {
        match segment {
            Segment::Paragraph(text) => {
                lines.push(Line::raw(text.clone()));
                lines.push(Line::raw(""));
            }
            Segment::List(items) => {
                for item in items {
                    lines.push(Line::from(vec![
                        Span::styled("• ", Style::default().fg(ACCENT)),
                        Span::raw(item.clone()),
                    ]));
                }
                lines.push(Line::raw(""));
            }
            Segment::Code { label, body } => {
                let selected = block_idx == app.detail.selected_block;
                let frame_style = if selected {
                    Style::default().fg(ACCENT)
                } else {
                    Style::default().fg(MUTED)
                };
                let mut head = vec![Span::styled("┌─ ", frame_style)];
                head.push(Span::styled(
                    label.clone().unwrap_or_else(|| "code".to_string()),
                    frame_style.add_modifier(Modifier::BOLD),
                ));
                if app.detail.block_copied_recently(block_idx) {
                    head.push(Span::styled(" ✓ 복사됨", Style::default().fg(SOLVED)));
                } else if selected {
                    head.push(Span::styled(" (y 복사)", Style::default().fg(MUTED)));
                }
                lines.push(Line::from(head));
                for code_line in body.lines() {
                    lines.push(Line::from(vec![
                        Span::styled("│ ", frame_style),
                        Span::styled(code_line.to_string(), Style::default().fg(Color::White)),
                    ]));
                }
                lines.push(Line::from(Span::styled("└─", frame_style)));
                lines.push(Line::raw(""));
                block_idx += 1;
            }
        }
    }
    lines
}

fn comments(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" 댓글 ({}) ", app.detail.comments.len()));

    if app.detail.comments.is_empty() {
        f.render_widget(
            Paragraph::new("아직 댓글이 없습니다.").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .detail
        .comments
        .iter()
        .map(|c| {
            let mut meta = format!("{} · {}", c.member.nickname, fmt_timestamp(c.created_at));
            if c.modified {
                meta.push_str(" (수정됨)");
            }
            ListItem::new(vec![
                Line::from(Span::styled(meta, Style::default().fg(MUTED))),
                Line::raw(c.content.replace('\n', " ")),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Indexed(236)))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(app.detail.selected_comment));
    f.render_stateful_widget(list, area, &mut state);
}

fn comment_compose(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.detail.editing_comment.is_some() {
        " 댓글 수정 "
    } else {
        " 댓글 작성 "
    };
    let mut lines: Vec<Line> = app
        .detail
        .comment_input
        .split('\n')
        .map(|l| Line::raw(l.to_string()))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if let Some(err) = &app.detail.comment_error {
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(DANGER))));
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        ),
        area,
    );
}

/// Single-line bordered input with focus highlight.
fn input_box(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let mut text = value.to_string();
    if focused {
        text.push('▏');
    }
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if focused { ACCENT } else { MUTED }))
                .title(title.to_string()),
        ),
        area,
    );
}

// ===============================
// Auth form (login / signup)
// ===============================
fn auth_form(f: &mut Frame, area: Rect, app: &App) {
    let form_area = centered_rect(46, 12, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // error
            Constraint::Length(3), // nickname
            Constraint::Length(3), // password
            Constraint::Length(1), // hint
        ])
        .split(form_area);

    if let Some(err) = &app.auth.error {
        f.render_widget(
            Paragraph::new(err.as_str())
                .style(Style::default().fg(DANGER))
                .alignment(Alignment::Center),
            chunks[0],
        );
    }

    input_box(
        f,
        chunks[1],
        "닉네임 (2~20자)",
        &app.auth.nickname,
        app.auth.field == AuthField::Nickname,
    );
    let masked = "*".repeat(app.auth.password.chars().count());
    input_box(
        f,
        chunks[2],
        "비밀번호 (2~20자)",
        &masked,
        app.auth.field == AuthField::Password,
    );

    let hint = if app.auth.submitting {
        "처리 중...".to_string()
    } else if app.route() == Route::Signup {
        "Enter 가입 │ 이미 계정이 있다면 Esc 후 i 로그인".to_string()
    } else {
        "Enter 로그인 │ 계정이 없다면 Esc 후 u 회원가입".to_string()
    };
    f.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center),
        chunks[3],
    );
}

// ===============================
// Post form (new / edit)
// ===============================
fn post_form(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // error
            Constraint::Length(3), // title
            Constraint::Min(6),    // content
            Constraint::Length(4), // tags
        ])
        .split(area);

    if let Some(err) = &app.form.error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(DANGER)),
            chunks[0],
        );
    } else if app.form.submitting {
        f.render_widget(
            Paragraph::new("처리 중...").style(Style::default().fg(MUTED)),
            chunks[0],
        );
    }

    input_box(f, chunks[1], "제목", &app.form.title, app.form.field == FormField::Title);

    let content_focused = app.form.field == FormField::Content;
    let mut content = app.form.content.clone();
    if content_focused {
        content.push('▏');
    }
    f.render_widget(
        Paragraph::new(content).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if content_focused { ACCENT } else { MUTED }))
                .title("내용 (``` 로 코드 블록)"),
        ),
        chunks[2],
    );

    tag_selector(f, chunks[3], app);
}

fn tag_selector(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.form.field == FormField::Tags;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { ACCENT } else { MUTED }))
        .title("태그 (언어/프레임워크, 하나 이상)");

    if app.form.tags_loading {
        f.render_widget(
            Paragraph::new("태그 불러오는 중...").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }

    let mut lang_spans: Vec<Span> = vec![Span::styled("언어: ", Style::default().fg(MUTED))];
    let mut fw_spans: Vec<Span> = vec![Span::styled("프레임워크: ", Style::default().fg(MUTED))];
    for (i, tag) in app.form.tags.iter().enumerate() {
        let selected = app.form.tag_ids.contains(&tag.id);
        let under_cursor = focused && i == app.form.tag_cursor;
        let mut style = if selected {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(ACCENT)
        };
        if under_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        let chip = Span::styled(format!(" {} ", tag.name), style);
        match tag.category {
            TagCategory::Language => {
                lang_spans.push(chip);
                lang_spans.push(Span::raw(" "));
            }
            TagCategory::Framework => {
                fw_spans.push(chip);
                fw_spans.push(Span::raw(" "));
            }
        }
    }
    f.render_widget(
        Paragraph::new(vec![Line::from(lang_spans), Line::from(fw_spans)]).block(block),
        area,
    );
}

// ===============================
// My page
// ===============================
fn mypage(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // profile
            Constraint::Length(1), // stats
            Constraint::Min(0),    // my posts
        ])
        .split(area);

    profile_card(f, chunks[0], app);
    stats_line(f, chunks[1], app);
    my_post_list(f, chunks[2], app);
}

fn profile_card(f: &mut Frame, area: Rect, app: &App) {
    let joined = app
        .session
        .member()
        .and_then(|m| m.created_at)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    let editing = app.mypage.editing_nickname;
    let nickname_line = if editing {
        Line::from(vec![
            Span::styled("닉네임: ", Style::default().fg(MUTED)),
            Span::styled(
                format!("{}▏", app.mypage.nickname_input),
                Style::default().fg(ACCENT),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("닉네임: ", Style::default().fg(MUTED)),
            Span::styled(
                app.session
                    .member()
                    .map(|m| m.nickname.clone())
                    .unwrap_or_default(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (n 수정)", Style::default().fg(MUTED)),
        ])
    };

    let mut lines = vec![
        nickname_line,
        Line::from(Span::styled(format!("가입일: {joined}"), Style::default().fg(MUTED))),
    ];
    if let Some(err) = &app.mypage.nick_error {
        lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(DANGER))));
    }
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" 프로필 "),
        ),
        area,
    );
}

fn stats_line(f: &mut Frame, area: Rect, app: &App) {
    // Stats derive from the current page; there is no dedicated stats endpoint
    let total = app.mypage.page.as_ref().map_or(0, |p| p.total_elements);
    let solved = app.mypage.page.as_ref().map_or(0, |p| {
        p.content
            .iter()
            .filter(|r| r.status == PostStatus::Solved)
            .count()
    });
    let comments: u32 = app
        .mypage
        .page
        .as_ref()
        .map_or(0, |p| p.content.iter().map(|r| r.comment_count).sum());
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("리뷰 {total}건 · 해결 {solved}건 · 댓글 {comments}개"),
            Style::default().fg(MUTED),
        ))),
        area,
    );
}

fn my_post_list(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(pager_title(app.mypage.page.as_ref()));

    if app.mypage.loading {
        f.render_widget(
            Paragraph::new("로딩 중...").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }
    if let Some(err) = &app.mypage.error {
        f.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(DANGER)).block(block),
            area,
        );
        return;
    }
    let Some(page) = &app.mypage.page else {
        f.render_widget(Paragraph::new("작성한 리뷰가 없습니다.").block(block), area);
        return;
    };
    if page.content.is_empty() {
        f.render_widget(
            Paragraph::new("작성한 리뷰가 없습니다.").style(Style::default().fg(MUTED)).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = page.content.iter().map(post_row).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Indexed(236)).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(Some(app.mypage.selected));
    f.render_stateful_widget(list, area, &mut state);
}

// ===============================
// Overlays
// ===============================
fn draw_confirm_modal(f: &mut Frame, app: &App) {
    let Some(action) = app.confirm() else { return };
    let area = centered_rect(40, 5, f.area());
    f.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::raw(action.message())),
        Line::raw(""),
        Line::from(Span::styled("y 삭제 │ n 취소", Style::default().fg(MUTED))),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(DANGER))
                .title(" 확인 "),
        ),
        area,
    );
}

fn draw_toast(f: &mut Frame, app: &App) {
    let Some(msg) = app.toast() else { return };
    let width = (msg.chars().count() as u16 + 6).min(f.area().width);
    let mut area = centered_rect(width, 3, f.area());
    // Pin near the bottom instead of dead center
    area.y = f.area().height.saturating_sub(5);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(msg).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT)),
        ),
        area,
    );
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
