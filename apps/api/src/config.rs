use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at
/// startup. Provider credentials are optional: absence disables that
/// provider, it is never an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// When true the keyword scorer answers after all remote providers fail.
    pub allow_local_scoring: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: optional_credential("OPENROUTER_API_KEY"),
            openai_api_key: optional_credential("OPENAI_API_KEY"),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            allow_local_scoring: std::env::var("ALLOW_LOCAL_SCORING")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a credential, trimming whitespace and surrounding quotes (keys
/// pasted into .env files are often wrapped in quotes). Empty values count
/// as absent.
fn optional_credential(key: &str) -> Option<String> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Masks a credential for logging: first and last four characters only.
pub fn mask_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "***".to_string()
    }
}
