use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use revu::app::{App, AppEvent, EditTarget, Route};
use revu::token_store::TokenStore;
use revu::{clipboard, config, source_api, ui, ApiClient, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = config::load().context("Failed to load configuration")?;

    let token_path = cfg
        .token_path
        .clone()
        .unwrap_or_else(TokenStore::default_path);
    let tokens = Arc::new(TokenStore::open(token_path));
    let client = Arc::new(
        ApiClient::new(&cfg.api_url, cfg.timeout_ms, tokens.clone())
            .context("Failed to build API client")?,
    );

    // app + channels (commands out, result events in)
    let (cmd_tx, cmd_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel::<AppEvent>();
    let api_task = tokio::spawn(source_api::run_api(client, cmd_rx, event_tx));

    let session = Session::new(tokens);
    let mut app = App::new(session, cmd_tx, cfg.page_size, cfg.mypage_size, cfg.render_fps);
    app.bootstrap();

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut app, &mut terminal, event_rx).await;

    // cleanup
    api_task.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();
    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input or API result events
        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        if last_frame.elapsed() >= budget {
            app.tick();
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    // Ctrl+C always quits
    if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
        app.on_event(AppEvent::Quit);
        return;
    }

    // Confirmation overlay swallows everything
    if app.confirm().is_some() {
        match k.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_accept(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_dismiss(),
            _ => {}
        }
        return;
    }

    // Text input mode: route keystrokes into the focused field
    if app.edit_target() != EditTarget::None {
        match (k.code, k.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => app.input_submit(),
            (KeyCode::Char(c), _) => app.input_char(c),
            (KeyCode::Backspace, _) => app.input_backspace(),
            (KeyCode::Enter, _) => app.input_enter(),
            (KeyCode::Tab, _) => app.input_tab(),
            (KeyCode::Esc, _) => app.input_esc(),
            (KeyCode::Left, _) => app.form_tag_left(),
            (KeyCode::Right, _) => app.form_tag_right(),
            _ => {}
        }
        return;
    }

    // Normal mode
    match (k.code, app.route()) {
        (KeyCode::Char('q'), _) => app.on_event(AppEvent::Quit),
        (KeyCode::Char('r'), _) => app.refresh(),
        (KeyCode::Esc, _) => app.go_back(),

        // Board
        (KeyCode::Up | KeyCode::Char('k'), Route::Board) => app.board_up(),
        (KeyCode::Down | KeyCode::Char('j'), Route::Board) => app.board_down(),
        (KeyCode::Enter, Route::Board) => app.board_open_selected(),
        (KeyCode::Left, Route::Board) => app.board_prev_page(),
        (KeyCode::Right, Route::Board) => app.board_next_page(),
        (KeyCode::Char('f'), Route::Board) => app.board_cycle_filter(),
        (KeyCode::Char('/'), Route::Board) => app.board_start_search(),
        (KeyCode::Char('w'), Route::Board) => app.goto_new_post(),
        (KeyCode::Char('m'), Route::Board) => app.goto_mypage(),
        (KeyCode::Char('i'), Route::Board) => app.goto_login(),
        (KeyCode::Char('u'), Route::Board) => app.goto_signup(),
        (KeyCode::Char('o'), Route::Board) => app.logout(),

        // Post detail
        (KeyCode::Up | KeyCode::Char('k'), Route::Detail(_)) => app.detail_comment_up(),
        (KeyCode::Down | KeyCode::Char('j'), Route::Detail(_)) => app.detail_comment_down(),
        (KeyCode::Char('['), Route::Detail(_)) => app.detail_prev_block(),
        (KeyCode::Char(']'), Route::Detail(_)) => app.detail_next_block(),
        (KeyCode::Char('y'), Route::Detail(_)) => {
            if let Some(text) = app.copy_block_payload() {
                if clipboard::copy_to_clipboard(&text) {
                    app.mark_block_copied();
                }
            }
        }
        (KeyCode::Char('c'), Route::Detail(_)) => app.detail_start_comment(),
        (KeyCode::Char('e'), Route::Detail(_)) => app.detail_edit_selected_comment(),
        (KeyCode::Char('d'), Route::Detail(_)) => app.request_delete_selected_comment(),
        (KeyCode::Char('t'), Route::Detail(_)) => app.toggle_post_status(),
        (KeyCode::Char('E'), Route::Detail(_)) => app.goto_edit_post(),
        (KeyCode::Char('D'), Route::Detail(_)) => app.request_delete_post(),

        // My page
        (KeyCode::Up | KeyCode::Char('k'), Route::MyPage) => app.mypage_up(),
        (KeyCode::Down | KeyCode::Char('j'), Route::MyPage) => app.mypage_down(),
        (KeyCode::Enter, Route::MyPage) => app.mypage_open_selected(),
        (KeyCode::Left, Route::MyPage) => app.mypage_prev_page(),
        (KeyCode::Right, Route::MyPage) => app.mypage_next_page(),
        (KeyCode::Char('n'), Route::MyPage) => app.mypage_start_nickname_edit(),

        _ => {}
    }
}
