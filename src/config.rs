use anyhow::{anyhow, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Revu - terminal client for the Revu code-review board
///
/// Keyboard-driven TUI over the board's REST API.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "revu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the Revu code-review board", long_about = None)]
pub struct CliArgs {
    /// Base URL of the backend API
    #[arg(long, env = "REVU_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds (1000-60000)
    #[arg(long, env = "REVU_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Posts per page on the board (1-50)
    #[arg(long, env = "REVU_PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Posts per page on the my-page review list (1-20)
    #[arg(long, env = "REVU_MYPAGE_SIZE")]
    pub mypage_size: Option<u32>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "REVU_RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Path to the persisted token file
    #[arg(long, env = "REVU_TOKEN_PATH")]
    pub token_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub timeout_ms: u64,
    pub page_size: u32,
    pub mypage_size: u32,
    pub render_fps: u32,
    pub token_path: Option<PathBuf>,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic scheme check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

fn from_args(args: CliArgs) -> Result<Config> {
    let api_url = args
        .api_url
        .or_else(|| env::var("REVU_API_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    validate_url(&api_url, "REVU_API_URL")?;
    // Joining paths later assumes no trailing slash
    let api_url = api_url.trim_end_matches('/').to_string();

    let timeout_ms = args
        .timeout_ms
        .or_else(|| env::var("REVU_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(8000);
    let timeout_ms = validate_in_range(timeout_ms, 1000, 60000, "REVU_TIMEOUT_MS")?;

    let page_size = args
        .page_size
        .or_else(|| env::var("REVU_PAGE_SIZE").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(10);
    let page_size = validate_in_range(page_size, 1, 50, "REVU_PAGE_SIZE")?;

    let mypage_size = args
        .mypage_size
        .or_else(|| env::var("REVU_MYPAGE_SIZE").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(4);
    let mypage_size = validate_in_range(mypage_size, 1, 20, "REVU_MYPAGE_SIZE")?;

    let render_fps = args
        .render_fps
        .or_else(|| env::var("REVU_RENDER_FPS").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(30);
    let render_fps = validate_in_range(render_fps, 1, 120, "REVU_RENDER_FPS")?;

    Ok(Config {
        api_url,
        timeout_ms,
        page_size,
        mypage_size,
        render_fps,
        token_path: args.token_path,
    })
}
