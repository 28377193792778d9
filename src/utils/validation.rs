// file: src/utils/validation.rs
// description: tool argument validation helpers
// reference: input validation patterns

use crate::error::{Result, ToolError};

pub struct Validator;

impl Validator {
    pub fn validate_query_not_empty(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(ToolError::Validation("Query is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_urls(urls: &[String]) -> Result<()> {
        urls.iter().try_for_each(|url| Self::validate_url(url))
    }

    /// Prompt hub names are `name` or `owner/name`.
    pub fn validate_prompt_name(name: &str) -> Result<()> {
        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() > 2 || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(ToolError::Validation(format!(
                "Invalid prompt name: '{}'",
                name
            )));
        }
        Ok(())
    }

    /// Shorten text for log lines, respecting char boundaries.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_not_empty() {
        assert!(Validator::validate_query_not_empty("capital of France").is_ok());
        assert!(Validator::validate_query_not_empty("").is_err());
        assert!(Validator::validate_query_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_urls_reports_first_bad_url() {
        let urls = vec![
            "https://example.com".to_string(),
            "notaurl".to_string(),
        ];
        let err = Validator::validate_urls(&urls).unwrap_err();
        assert!(err.to_string().contains("notaurl"));
    }

    #[test]
    fn test_validate_prompt_name() {
        assert!(Validator::validate_prompt_name("team/prompt").is_ok());
        assert!(Validator::validate_prompt_name("prompt").is_ok());
        assert!(Validator::validate_prompt_name("a/b/c").is_err());
        assert!(Validator::validate_prompt_name("team/").is_err());
        assert!(Validator::validate_prompt_name("").is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("héllo wörld", 4), "héll...");
    }
}
