//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{AiDriver, ApiDriver, DriverError, GenerationStrategy};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API driver.
    pub driver: ApiDriver,
    /// GitHub options.
    pub github: ApiGitHubConfig,
}

#[derive(Debug, Clone)]
pub struct ApiGitHubConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
    /// GitHub API personal token.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// AI backend driver.
    pub driver: AiDriver,
    /// API key forwarded to the backend.
    pub api_key: String,
    /// Base URL override.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Backend call timeout (in seconds).
    pub timeout_seconds: u64,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Command line executable.
    pub cli_executable: String,
    /// Code generation strategy.
    pub strategy: GenerationStrategy,
    /// Extra attempts for in-workspace generation.
    pub max_retries: u32,
    /// Base backoff between attempts (in seconds).
    pub retry_backoff: u64,
}

#[derive(Debug, Clone)]
pub struct GitConfig {
    /// Root directory for workspaces.
    pub work_dir: String,
    /// Committer name.
    pub user_name: String,
    /// Committer email.
    pub user_email: String,
    /// Max readable file size (in bytes).
    pub max_file_size: u64,
    /// Clone timeout (in seconds).
    pub clone_timeout: u64,
    /// Push timeout (in seconds).
    pub push_timeout: u64,
    /// Timeout for other git commands (in seconds).
    pub command_timeout: u64,
    /// Workspace cache TTL (in seconds).
    pub cache_ttl: u64,
    /// Minimum interval between two clones of the same repository (in seconds).
    pub clone_interval: u64,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Server webhook secret.
    pub webhook_secret: String,
    /// Disable webhook signature verification.
    pub disable_webhook_signature: bool,
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot name.
    pub name: String,
    /// API options.
    pub api: ApiConfig,
    /// AI backend options.
    pub ai: AiConfig,
    /// Git workspace options.
    pub git: GitConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, DriverError> {
        Ok(Config {
            name: env_to_str("BOT_NAME", "codeagent"),
            api: ApiConfig {
                driver: ApiDriver::from_str(&env_to_str("BOT_API_DRIVER", "github"))?,
                github: ApiGitHubConfig {
                    connect_timeout: env_to_u64("BOT_API_GITHUB_CONNECT_TIMEOUT", 5000),
                    root_url: env_to_str("BOT_API_GITHUB_ROOT_URL", "https://api.github.com"),
                    token: env_to_str("BOT_API_GITHUB_TOKEN", ""),
                },
            },
            ai: AiConfig {
                driver: AiDriver::from_str(&env_to_str("BOT_AI_DRIVER", "claude-cli"))?,
                api_key: env_to_str("BOT_AI_API_KEY", ""),
                base_url: env_to_str("BOT_AI_BASE_URL", ""),
                model: env_to_str("BOT_AI_MODEL", "claude-3-5-sonnet-20241022"),
                timeout_seconds: env_to_u64("BOT_AI_TIMEOUT_SECONDS", 120),
                max_tokens: env_to_u32("BOT_AI_MAX_TOKENS", 4000),
                cli_executable: env_to_str("BOT_AI_CLI_EXECUTABLE", "claude"),
                strategy: GenerationStrategy::from_str(&env_to_str("BOT_AI_STRATEGY", "auto"))?,
                max_retries: env_to_u32("BOT_AI_MAX_RETRIES", 2),
                retry_backoff: env_to_u64("BOT_AI_RETRY_BACKOFF", 5),
            },
            git: GitConfig {
                work_dir: env_to_str("BOT_GIT_WORK_DIR", "/tmp/codeagent"),
                user_name: env_to_str("BOT_GIT_USER_NAME", "CodeAgent"),
                user_email: env_to_str("BOT_GIT_USER_EMAIL", "codeagent@example.com"),
                max_file_size: env_to_u64("BOT_GIT_MAX_FILE_SIZE", 1024 * 1024),
                clone_timeout: env_to_u64("BOT_GIT_CLONE_TIMEOUT", 90),
                push_timeout: env_to_u64("BOT_GIT_PUSH_TIMEOUT", 120),
                command_timeout: env_to_u64("BOT_GIT_COMMAND_TIMEOUT", 60),
                cache_ttl: env_to_u64("BOT_GIT_CACHE_TTL", 30 * 60),
                clone_interval: env_to_u64("BOT_GIT_CLONE_INTERVAL", 5 * 60),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BOT_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("BOT_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("BOT_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("BOT_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("BOT_SERVER_BIND_PORT", 8008),
                workers_count: env_to_optional_u16("BOT_SERVER_WORKERS_COUNT", None),
                webhook_secret: env_to_str("BOT_SERVER_WEBHOOK_SECRET", ""),
                disable_webhook_signature: env_to_bool(
                    "BOT_SERVER_DISABLE_WEBHOOK_SIGNATURE",
                    false,
                ),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Config, DriverError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
