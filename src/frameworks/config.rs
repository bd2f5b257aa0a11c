use std::{env, path::PathBuf, str::FromStr, time::Duration};
use url::Url;
use uuid::Uuid;

use crate::use_cases::tokens::DEFAULT_TOKEN_TTL_SECONDS;

pub const DEFAULT_HTTP_PORT: u16 = 8001;
pub const DEFAULT_TRITON_URL: &str = "http://localhost:8000";
pub const DEFAULT_MODEL_NAME: &str = "mixtral";
pub const DEFAULT_OUTPUT_NAME: &str = "generated_text";
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_USERS_FILE: &str = "users.json";
pub const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

// Which slide generator backs the AI routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorMode {
    Triton,
    Mock,
}

impl GeneratorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorMode::Triton => "triton",
            GeneratorMode::Mock => "mock",
        }
    }
}

impl FromStr for GeneratorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "triton" => Ok(GeneratorMode::Triton),
            "mock" => Ok(GeneratorMode::Mock),
            other => Err(format!("unknown slide generator {other}")),
        }
    }
}

// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_port: u16,
    pub triton_url: String,
    pub model_name: String,
    pub output_name: String,
    pub inference_timeout: Duration,
    pub generator: GeneratorMode,
    pub users_file: PathBuf,
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            http_port: http_port(),
            triton_url: triton_url(),
            model_name: model_name(),
            output_name: output_name(),
            inference_timeout: inference_timeout(),
            generator: generator_mode(),
            users_file: users_file(),
            jwt_secret: jwt_secret(),
            token_ttl_seconds: token_ttl_seconds(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            triton_url: DEFAULT_TRITON_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
            generator: GeneratorMode::Triton,
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
            jwt_secret: random_secret(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

pub fn http_port() -> u16 {
    parse_env("APP_PORT").unwrap_or(DEFAULT_HTTP_PORT)
}

pub fn triton_url() -> String {
    let raw = env::var("TRITON_URL").unwrap_or_else(|_| DEFAULT_TRITON_URL.to_string());
    normalize_base_url(&raw).unwrap_or_else(|| {
        tracing::warn!(value = %raw, "invalid TRITON_URL; using default");
        DEFAULT_TRITON_URL.to_string()
    })
}

pub fn model_name() -> String {
    non_empty_env("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string())
}

pub fn output_name() -> String {
    non_empty_env("TRITON_OUTPUT_NAME").unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string())
}

pub fn inference_timeout() -> Duration {
    parse_env::<u64>("INFERENCE_TIMEOUT_MS")
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_INFERENCE_TIMEOUT)
}

pub fn generator_mode() -> GeneratorMode {
    parse_env("SLIDE_GENERATOR").unwrap_or(GeneratorMode::Triton)
}

pub fn users_file() -> PathBuf {
    non_empty_env("USERS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE))
}

pub fn jwt_secret() -> String {
    non_empty_env("JWT_SECRET").unwrap_or_else(|| {
        tracing::warn!("JWT_SECRET is not set; tokens will not survive a restart");
        random_secret()
    })
}

pub fn token_ttl_seconds() -> u64 {
    parse_env::<u64>("TOKEN_TTL_SECONDS")
        .and_then(checked_token_ttl)
        .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS)
}

fn checked_token_ttl(seconds: u64) -> Option<u64> {
    if (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds) {
        Some(seconds)
    } else {
        tracing::warn!(
            value = seconds,
            max = MAX_TOKEN_TTL_SECONDS,
            "TOKEN_TTL_SECONDS out of range; using default"
        );
        None
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Unset is silent; a value that fails to parse is logged and ignored.
fn parse_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = non_empty_env(key)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "invalid environment value; using default");
            None
        }
    }
}

// Accepts `host:port` as well as full URLs and drops any trailing slash.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }

    Some(url.as_str().trim_end_matches('/').to_string())
}

fn random_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
