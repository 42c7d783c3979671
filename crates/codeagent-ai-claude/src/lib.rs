//! Claude backends.
//!
//! - [`ClaudeCliService`] drives the `claude` command line and can edit files in a workspace.
//! - [`ClaudeApiService`] calls the Messages HTTP API and only returns text.

#![warn(clippy::all)]

mod api;
mod cli;

pub use api::ClaudeApiService;
pub use cli::ClaudeCliService;

/// Mask an API key for logs, keeping the first and last four characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "***".into();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking() {
        assert_eq!(mask_api_key(""), "***");
        assert_eq!(mask_api_key("12345678"), "***");
        assert_eq!(mask_api_key("sk-ant-abcdef-1234"), "sk-a***1234");
    }
}
