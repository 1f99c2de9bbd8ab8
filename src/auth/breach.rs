//! Breach oracle client for Authgate.
//!
//! Checks whether a password appears in a public breach corpus using a
//! k-anonymity range query: only the first five hex characters of the
//! password's SHA-1 digest are sent to the oracle, which answers with every
//! known suffix under that prefix. The match is found locally, so neither
//! the plaintext nor the full digest ever crosses the network.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::auth::password::BreachDigest;
use crate::config::BreachConfig;

/// User agent string for oracle requests.
const USER_AGENT: &str = "Authgate/1.0 (password breach check)";

/// Breach lookup errors. All of them mean "could not check" — a failed
/// lookup is never reported as a clean result.
#[derive(Error, Debug)]
pub enum BreachError {
    /// Breach checking is turned off in the configuration.
    #[error("breach checking is disabled")]
    Disabled,

    /// The oracle base URL is not usable.
    #[error("invalid breach oracle URL: {0}")]
    InvalidUrl(String),

    /// The request failed (connect error, timeout, ...).
    #[error("breach oracle request failed: {0}")]
    Request(String),

    /// The oracle answered with a non-success status.
    #[error("breach oracle returned HTTP {0}")]
    Status(u16),

    /// The oracle's response body could not be interpreted.
    #[error("breach oracle returned a malformed response: {0}")]
    InvalidResponse(String),
}

/// Outcome of a breach lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachResult {
    /// Whether the password appears in the corpus.
    pub breached: bool,
    /// How many times it was seen in known breaches.
    pub count: u64,
}

impl BreachResult {
    /// A password with no corpus entry.
    pub fn clean() -> Self {
        Self {
            breached: false,
            count: 0,
        }
    }
}

/// Client for the breach corpus range endpoint.
#[derive(Debug, Clone)]
pub struct BreachClient {
    client: Client,
    base_url: String,
}

impl BreachClient {
    /// Create a client from the breach configuration.
    pub fn new(config: &BreachConfig) -> Result<Self, BreachError> {
        let parsed = url::Url::parse(&config.base_url)
            .map_err(|e| BreachError::InvalidUrl(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(BreachError::InvalidUrl(format!(
                    "unsupported URL scheme: {scheme}"
                )));
            }
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BreachError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check a password against the breach corpus.
    pub async fn check(&self, password: &str) -> Result<BreachResult, BreachError> {
        let digest = BreachDigest::of(password);
        self.check_digest(&digest).await
    }

    /// Check an already-computed digest against the breach corpus.
    pub async fn check_digest(&self, digest: &BreachDigest) -> Result<BreachResult, BreachError> {
        let url = format!("{}/{}", self.base_url, digest.prefix());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BreachError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreachError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BreachError::Request(e.to_string()))?;

        scan_range_body(&body, digest.suffix())
    }
}

/// Scan a `SUFFIX:COUNT` range response for the local suffix.
///
/// The comparison is case-insensitive. A matching line with an unparseable
/// count is a malformed response, not a clean result.
fn scan_range_body(body: &str, suffix: &str) -> Result<BreachResult, BreachError> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (candidate, count) = line
            .split_once(':')
            .ok_or_else(|| BreachError::InvalidResponse(format!("missing separator: {line}")))?;

        if candidate.trim().eq_ignore_ascii_case(suffix) {
            let count: u64 = count
                .trim()
                .parse()
                .map_err(|_| BreachError::InvalidResponse(format!("bad count: {line}")))?;
            return Ok(BreachResult {
                breached: true,
                count,
            });
        }
    }

    Ok(BreachResult::clean())
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-1("password") suffix under prefix 5BAA6
    const PASSWORD_SUFFIX: &str = "1E4C9B93F3F0682250B6CF8331B7EE68FD8";

    #[test]
    fn test_scan_finds_matching_suffix() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:3\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:24230577\n\
                    011053FD0BB1D2F350BDE608861348671EF:2";

        let result = scan_range_body(body, PASSWORD_SUFFIX).unwrap();
        assert!(result.breached);
        assert_eq!(result.count, 24_230_577);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let body = "1e4c9b93f3f0682250b6cf8331b7ee68fd8:5";
        let result = scan_range_body(body, PASSWORD_SUFFIX).unwrap();
        assert!(result.breached);
        assert_eq!(result.count, 5);
    }

    #[test]
    fn test_scan_no_match_is_clean() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:3\n\
                    011053FD0BB1D2F350BDE608861348671EF:2";

        let result = scan_range_body(body, PASSWORD_SUFFIX).unwrap();
        assert!(!result.breached);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_scan_empty_body_is_clean() {
        let result = scan_range_body("", PASSWORD_SUFFIX).unwrap();
        assert!(!result.breached);
    }

    #[test]
    fn test_scan_missing_separator_is_error() {
        let result = scan_range_body("JUNKWITHOUTSEPARATOR", PASSWORD_SUFFIX);
        assert!(matches!(result, Err(BreachError::InvalidResponse(_))));
    }

    #[test]
    fn test_scan_bad_count_on_match_is_error() {
        let body = format!("{PASSWORD_SUFFIX}:many");
        let result = scan_range_body(&body, PASSWORD_SUFFIX);
        assert!(matches!(result, Err(BreachError::InvalidResponse(_))));
    }

    #[test]
    fn test_scan_tolerates_crlf_and_blank_lines() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:3\r\n\r\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:7\r\n";
        let result = scan_range_body(body, PASSWORD_SUFFIX).unwrap();
        assert!(result.breached);
        assert_eq!(result.count, 7);
    }

    #[test]
    fn test_new_rejects_bad_scheme() {
        let config = BreachConfig {
            base_url: "ftp://example.com/range".to_string(),
            ..BreachConfig::default()
        };
        assert!(matches!(
            BreachClient::new(&config),
            Err(BreachError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let config = BreachConfig {
            base_url: "not a url".to_string(),
            ..BreachConfig::default()
        };
        assert!(matches!(
            BreachClient::new(&config),
            Err(BreachError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = BreachConfig {
            base_url: "https://example.com/range/".to_string(),
            ..BreachConfig::default()
        };
        let client = BreachClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://example.com/range");
    }
}
