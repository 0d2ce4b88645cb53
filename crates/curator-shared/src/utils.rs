//! Utility functions

/// Strip trailing slashes so that base URLs can be joined with a path.
pub fn trim_base_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Shorten a session token for log lines.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 8 {
        "***".to_string()
    } else {
        let head: String = token.chars().take(8).collect();
        format!("{}***", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_base_url() {
        assert_eq!(trim_base_url("https://example.com/"), "https://example.com");
        assert_eq!(trim_base_url(" https://example.com// "), "https://example.com");
        assert_eq!(trim_base_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("0123456789abcdef"), "01234567***");
    }
}
