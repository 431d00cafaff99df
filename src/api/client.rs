//! Fallback-host GET client.

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{FALLBACK_URLS, PRIMARY_URL_ENV, USER_AGENT};

/// Errors surfaced to callers. Per-host failures are logged and
/// swallowed; only whole-call outcomes appear here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Every candidate host failed (or none were configured).
    #[error("all API hosts failed for {path}")]
    AllHostsExhausted { path: String },

    /// A host answered with success but the body did not parse.
    #[error("unexpected response body for {path}: {source}")]
    MalformedResponse {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// HTTP client holding the ordered candidate base URLs.
///
/// Requests are blocking; callers run them on the async compute pool.
#[derive(Resource, Clone)]
pub struct ApiClient {
    bases: Vec<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApiClient {
    /// Build the client from the `WALLGAZER_API_URL` override (when
    /// set) plus the declared fallback hosts.
    pub fn from_env() -> Self {
        let primary = std::env::var(PRIMARY_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| FALLBACK_URLS[0].to_string());
        Self::with_hosts(primary, FALLBACK_URLS.iter().map(|url| url.to_string()))
    }

    /// Build the client from an explicit primary and fallback list.
    /// Fallbacks equal to the primary are dropped so no host is tried
    /// twice in one pass.
    pub fn with_hosts(primary: String, fallbacks: impl IntoIterator<Item = String>) -> Self {
        let mut bases = vec![primary.clone()];
        bases.extend(fallbacks.into_iter().filter(|url| *url != primary));
        Self { bases }
    }

    /// The candidate base URLs, in the order they will be attempted.
    pub fn candidates(&self) -> &[String] {
        &self.bases
    }

    /// GET `path` with `params`, trying each candidate host in order.
    ///
    /// Params with a `None` value are omitted from the query string.
    /// A transport error or non-2xx status moves on to the next host;
    /// the first success wins. One pass, no per-host retries.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T, ApiError> {
        for base in &self.bases {
            let url = join_url(base, path);
            let mut request = ureq::get(&url).set("User-Agent", USER_AGENT);
            for (key, value) in present_params(params) {
                request = request.query(key, value);
            }

            match request.call() {
                Ok(response) => {
                    return response
                        .into_json::<T>()
                        .map_err(|source| ApiError::MalformedResponse {
                            path: path.to_string(),
                            source,
                        });
                }
                Err(e) => {
                    warn!("request to {} failed: {}", url, e);
                }
            }
        }

        Err(ApiError::AllHostsExhausted {
            path: path.to_string(),
        })
    }
}

/// Filter out absent parameter values so they never reach the query
/// string (the upstream API treats a literal "undefined" as a term).
fn present_params<'a>(
    params: &'a [(&'a str, Option<String>)],
) -> impl Iterator<Item = (&'a str, &'a str)> {
    params
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
}

/// Join a base URL and an absolute path without doubling the slash.
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[derive(Debug, Deserialize)]
    struct Body {
        ok: bool,
    }

    /// Spawn a one-shot HTTP server returning the given body as JSON.
    /// Returns the base URL to reach it.
    fn one_shot_server(status: u16, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://127.0.0.1:{}", port)
    }

    /// A base URL nothing listens on; connections are refused at once.
    fn dead_host() -> String {
        "http://127.0.0.1:1".to_string()
    }

    #[test]
    fn test_with_hosts_dedups_primary() {
        let client = ApiClient::with_hosts(
            "https://a.example".to_string(),
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ],
        );
        assert_eq!(
            client.candidates(),
            &["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_empty_candidate_list_fails_immediately() {
        let client = ApiClient {
            bases: Vec::new(),
        };
        let result: Result<Body, _> = client.get_json("/api/wallhaven/home", &[]);
        assert!(matches!(result, Err(ApiError::AllHostsExhausted { .. })));
    }

    #[test]
    fn test_present_params_omits_none() {
        let params = [
            ("page", Some("2".to_string())),
            ("q", None),
            ("sort", Some("latest".to_string())),
        ];
        let applied: Vec<_> = present_params(&params).collect();
        assert_eq!(applied, vec![("page", "2"), ("sort", "latest")]);
    }

    #[test]
    fn test_join_url_handles_slash_seams() {
        assert_eq!(join_url("http://x", "/a/b"), "http://x/a/b");
        assert_eq!(join_url("http://x/", "/a/b"), "http://x/a/b");
        assert_eq!(join_url("http://x/", "a/b"), "http://x/a/b");
    }

    #[test]
    fn test_fallback_reaches_healthy_host() {
        let healthy = one_shot_server(200, r#"{"ok":true}"#);
        let client = ApiClient::with_hosts(dead_host(), vec![dead_host(), healthy]);

        let body: Body = client.get_json("/ping", &[]).unwrap();
        assert!(body.ok);
    }

    #[test]
    fn test_non_success_status_moves_to_next_host() {
        let failing = one_shot_server(500, r#"{"ok":false}"#);
        let healthy = one_shot_server(200, r#"{"ok":true}"#);
        let client = ApiClient::with_hosts(failing, vec![healthy]);

        let body: Body = client.get_json("/ping", &[]).unwrap();
        assert!(body.ok);
    }

    #[test]
    fn test_all_hosts_failing_is_exhausted() {
        let client = ApiClient::with_hosts(dead_host(), vec![dead_host(), dead_host()]);
        let result: Result<Body, _> = client.get_json("/ping", &[]);
        match result {
            Err(ApiError::AllHostsExhausted { path }) => assert_eq!(path, "/ping"),
            other => panic!("expected exhaustion, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_success_with_bad_body_is_malformed() {
        let garbled = one_shot_server(200, "not json");
        let client = ApiClient::with_hosts(garbled, vec![]);
        let result: Result<Body, _> = client.get_json("/ping", &[]);
        assert!(matches!(result, Err(ApiError::MalformedResponse { .. })));
    }
}
