//! Access URL and deployment id parsing
//!
//! Creating a deployment answers with a sentence such as
//! `Custom deployment initiated. Access it at: https://myapp-abcd123.edge.example.com`
//! instead of structured JSON. The id is never returned directly: it is the
//! last hyphen-delimited segment of the host label.

use crate::error::{Result, ThetaError};

/// Pull the access URL out of the create response sentence
pub fn extract_access_url(sentence: &str) -> Result<String> {
    sentence
        .split_whitespace()
        .find(|word| word.starts_with("https://") || word.starts_with("http://"))
        .map(|word| {
            word.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ')' | '"' | '\''))
                .to_string()
        })
        .ok_or_else(|| {
            ThetaError::UnexpectedFormat(format!("unexpected response format: {}", sentence))
        })
}

/// Derive the deployment id from its access URL
///
/// `https://myapp-abcd123.edge.example.com` yields `abcd123`. A host label
/// with fewer than two hyphen-delimited segments is an error.
pub fn extract_deployment_id(url: &str) -> Result<String> {
    let unexpected = || ThetaError::UnexpectedFormat(format!("unexpected URL format: {}", url));

    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let label = host.split(['.', ':']).next().unwrap_or_default();

    let segments: Vec<&str> = label.split('-').collect();
    if segments.len() < 2 {
        return Err(unexpected());
    }

    match segments.last() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(unexpected()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_deployment_id() {
        assert_eq!(
            extract_deployment_id("https://myapp-abcd123.edge.example.com").unwrap(),
            "abcd123"
        );
    }

    #[test]
    fn test_extract_deployment_id_uses_last_hyphen_of_host_label() {
        assert_eq!(
            extract_deployment_id("https://my-cool-app-x9y8.tec-s1.example.com/path-with-hyphens")
                .unwrap(),
            "x9y8"
        );
    }

    #[test]
    fn test_extract_deployment_id_without_hyphen_is_error() {
        let err = extract_deployment_id("https://noHyphenHost.example.com").unwrap_err();
        assert!(matches!(err, ThetaError::UnexpectedFormat(_)));
        assert!(err.to_string().contains("unexpected URL format"));
    }

    #[test]
    fn test_extract_deployment_id_trailing_hyphen_is_error() {
        assert!(extract_deployment_id("https://myapp-.example.com").is_err());
    }

    #[test]
    fn test_extract_access_url() {
        let sentence =
            "Custom deployment initiated. Access it at: https://myapp-abcd123.edge.example.com\n";
        assert_eq!(
            extract_access_url(sentence).unwrap(),
            "https://myapp-abcd123.edge.example.com"
        );
    }

    #[test]
    fn test_extract_access_url_strips_trailing_punctuation() {
        let sentence = "Ready. Access it at: https://a-b.example.com.";
        assert_eq!(extract_access_url(sentence).unwrap(), "https://a-b.example.com");
    }

    #[test]
    fn test_extract_access_url_missing() {
        let err = extract_access_url("Deployment queued").unwrap_err();
        assert!(matches!(err, ThetaError::UnexpectedFormat(_)));
    }
}
