//! API utilities for talking to the message relay
//!
//! Provides helper functions for constructing API URLs.

/// Origin of the production message relay.
///
/// The relay is the only server this application talks to; the origin is
/// fixed and carries no credentials.
pub const API_BASE: &str = "https://yokohama-uwu.love";

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/send-line-message/");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("/api/send-line-message/"),
            "https://yokohama-uwu.love/api/send-line-message/"
        );
    }
}
