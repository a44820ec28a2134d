use serde::Deserialize;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Configuration for browser sessions
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Custom user agent. Empty keeps Chrome's own.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Budget for the document load, in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Budget for the container selector to show up after load, in seconds
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Disable image loading for performance
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Additional Chrome flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

fn default_true() -> bool { true }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_navigation_timeout() -> u64 { 60 }
fn default_render_timeout() -> u64 { 10 }

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: default_user_agent(),
            navigation_timeout_secs: default_navigation_timeout(),
            render_timeout_secs: default_render_timeout(),
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Chrome command line switches derived from this configuration
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-dev-shm-usage".to_string(),
            "--no-sandbox".to_string(),
        ];

        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }

        let user_agent = self.user_agent.trim();
        if !user_agent.is_empty() {
            args.push(format!("--user-agent={}", user_agent));
        }

        args.extend(self.chrome_flags.iter().cloned());
        args
    }
}
