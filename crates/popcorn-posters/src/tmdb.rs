use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use popcorn_core::ExternalId;

use crate::config::PosterConfig;
use crate::error::{PosterError, Result};
use crate::resolver::{PosterOutcome, PosterResolver};

/// Subset of the TMDB `/movie/{id}` response we read.
#[derive(Debug, Deserialize)]
struct MovieDetails {
    poster_path: Option<String>,
}

/// Looks up posters through the TMDB movie details endpoint.
///
/// Each lookup is a single request bounded by the configured timeout. No
/// retries; any failure becomes a placeholder outcome.
pub struct TmdbPosterResolver {
    config: PosterConfig,
    client: Client,
}

impl TmdbPosterResolver {
    /// Creates a resolver with its own blocking HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `PosterError::Client` if the TLS backend cannot be initialized.
    pub fn new(config: PosterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(PosterError::Client)?;
        Ok(Self { config, client })
    }

    #[must_use]
    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Builds `{api_base}/movie/{id}?language=..` with the id as one escaped path segment.
    ///
    /// # Errors
    ///
    /// Returns `PosterError::InvalidId` for ids that cannot name a single
    /// segment and `PosterError::InvalidUrl` if the API base is unusable.
    pub fn movie_url(&self, external_id: &ExternalId) -> Result<Url> {
        let id = external_id.as_str();
        if matches!(id, "" | "." | "..") {
            return Err(PosterError::InvalidId(id.to_string()));
        }

        let invalid_base = || PosterError::InvalidUrl(self.config.api_base.clone());
        let mut url = Url::parse(&self.config.api_base).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|()| invalid_base())?
            .pop_if_empty()
            .push("movie")
            .push(id);
        url.query_pairs_mut()
            .clear()
            .append_pair("language", &self.config.language);
        url.set_fragment(None);
        Ok(url)
    }

    /// Fetches the poster URL for one movie, reporting why it failed if it did.
    ///
    /// # Errors
    ///
    /// Returns the `PosterError` describing the failed step.
    pub fn fetch_poster_url(&self, external_id: &ExternalId) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(PosterError::MissingApiKey)?;

        let url = self.movie_url(external_id)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(api_key)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(PosterError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(PosterError::Transport)?;
        let poster_path = parse_poster_path(&body)?;
        Ok(self.config.poster_url(&poster_path))
    }
}

/// Extracts a non-empty `poster_path` from a movie details body.
fn parse_poster_path(body: &str) -> Result<String> {
    let details: MovieDetails =
        serde_json::from_str(body).map_err(|e| PosterError::Malformed(e.to_string()))?;
    details
        .poster_path
        .filter(|path| !path.is_empty())
        .ok_or(PosterError::NoPoster)
}

impl PosterResolver for TmdbPosterResolver {
    fn resolve_poster(&self, external_id: &ExternalId) -> PosterOutcome {
        match self.fetch_poster_url(external_id) {
            Ok(url) => {
                debug!(%external_id, %url, "poster resolved");
                PosterOutcome::Found { url }
            }
            Err(err) => {
                match err {
                    PosterError::MissingApiKey | PosterError::NoPoster => {
                        debug!(%external_id, %err, "using placeholder poster");
                    }
                    _ => warn!(%external_id, %err, "poster lookup failed"),
                }
                PosterOutcome::Placeholder {
                    url: self.config.placeholder_url.clone(),
                    reason: err.reason(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    use super::*;
    use crate::cache::CachedPosterResolver;
    use crate::config::DEFAULT_PLACEHOLDER_URL;
    use crate::resolver::PlaceholderReason;

    /// Serves one canned response per connection, in order, then stops
    /// listening. Returns the API base URL and the raw requests received.
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/3", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                }
                requests.push(String::from_utf8_lossy(&raw).into_owned());

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
            requests
        });

        (base, handle)
    }

    fn resolver_for(base: &str) -> TmdbPosterResolver {
        let config = PosterConfig::new()
            .with_api_key(Some("secret-token".into()))
            .with_api_base(base)
            .with_timeout(Duration::from_secs(5));
        TmdbPosterResolver::new(config).unwrap()
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    #[test]
    fn parses_poster_path() {
        let body = r#"{"id": 19995, "title": "Avatar", "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"}"#;
        assert_eq!(
            parse_poster_path(body).unwrap(),
            "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        );
    }

    #[test]
    fn missing_or_null_poster_path() {
        assert!(matches!(
            parse_poster_path(r#"{"poster_path": null}"#),
            Err(PosterError::NoPoster)
        ));
        assert!(matches!(
            parse_poster_path(r#"{"title": "x"}"#),
            Err(PosterError::NoPoster)
        ));
        assert!(matches!(
            parse_poster_path(r#"{"poster_path": ""}"#),
            Err(PosterError::NoPoster)
        ));
    }

    #[test]
    fn malformed_body() {
        assert!(matches!(
            parse_poster_path("<html>"),
            Err(PosterError::Malformed(_))
        ));
    }

    #[test]
    fn without_api_key_returns_placeholder() {
        let resolver = TmdbPosterResolver::new(PosterConfig::default()).unwrap();
        let outcome = resolver.resolve_poster(&ExternalId::new("19995"));
        assert_eq!(outcome.url(), DEFAULT_PLACEHOLDER_URL);
        assert_eq!(outcome.reason(), Some(PlaceholderReason::MissingApiKey));
    }

    #[test]
    fn unreachable_api_returns_placeholder() {
        let config = PosterConfig::new()
            .with_api_key(Some("token".into()))
            .with_api_base("http://127.0.0.1:9")
            .with_placeholder("https://example.invalid/none.png")
            .with_timeout(Duration::from_secs(1));
        let resolver = TmdbPosterResolver::new(config).unwrap();

        let outcome = resolver.resolve_poster(&ExternalId::new("19995"));
        assert_eq!(outcome.url(), "https://example.invalid/none.png");
        assert_eq!(outcome.reason(), Some(PlaceholderReason::Transport));
    }

    #[test]
    fn found_poster_joins_image_base_and_sends_expected_request() {
        let (base, server) = serve(vec![(200, r#"{"id": 19995, "poster_path": "/avatar.jpg"}"#)]);
        let outcome = resolver_for(&base).resolve_poster(&ExternalId::new("19995"));

        assert_eq!(
            outcome,
            PosterOutcome::Found {
                url: "https://image.tmdb.org/t/p/original/avatar.jpg".into()
            }
        );

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            request_line(&requests[0]),
            "GET /3/movie/19995?language=en-US HTTP/1.1"
        );
        let headers = requests[0].to_ascii_lowercase();
        assert!(headers.contains("\r\nauthorization: bearer secret-token\r\n"));
        assert!(headers.contains("\r\naccept: application/json\r\n"));
    }

    #[test]
    fn not_found_status_is_cached_placeholder() {
        let (base, server) = serve(vec![(404, r#"{"success": false}"#)]);
        let cached = CachedPosterResolver::new(resolver_for(&base));
        let id = ExternalId::new("404404");

        let first = cached.resolve_poster(&id);
        assert_eq!(first.url(), DEFAULT_PLACEHOLDER_URL);
        assert_eq!(first.reason(), Some(PlaceholderReason::Http(404)));

        // The stub is gone after one response; a second fetch would be a Transport error.
        let second = cached.resolve_poster(&id);
        assert_eq!(second.reason(), Some(PlaceholderReason::Http(404)));
        assert_eq!(cached.len(), 1);
        assert_eq!(server.join().unwrap().len(), 1);
    }

    #[test]
    fn unavailable_status_is_not_cached() {
        let (base, server) = serve(vec![(503, "{}"), (503, "{}")]);
        let cached = CachedPosterResolver::new(resolver_for(&base));
        let id = ExternalId::new("19995");

        for _ in 0..2 {
            let outcome = cached.resolve_poster(&id);
            assert_eq!(outcome.url(), DEFAULT_PLACEHOLDER_URL);
            assert_eq!(outcome.reason(), Some(PlaceholderReason::Http(503)));
        }
        assert!(cached.is_empty());
        assert_eq!(server.join().unwrap().len(), 2);
    }

    #[test]
    fn hostile_id_stays_inside_movie_path() {
        let (base, server) = serve(vec![(200, r#"{"poster_path": "/x.jpg"}"#)]);
        resolver_for(&base).resolve_poster(&ExternalId::new("../tv/1399?x=1#"));

        let requests = server.join().unwrap();
        let target = request_line(&requests[0])
            .strip_prefix("GET ")
            .and_then(|rest| rest.strip_suffix(" HTTP/1.1"))
            .unwrap();
        let (path, query) = target.split_once('?').unwrap();
        let segment = path.strip_prefix("/3/movie/").unwrap();
        assert!(!segment.contains('/'), "id escaped its segment: {path}");
        assert!(!segment.is_empty());
        assert_eq!(query, "language=en-US");
    }

    #[test]
    fn movie_url_escapes_id_and_handles_trailing_slash() {
        let resolver = resolver_for("https://api.example.test/3/");
        let url = resolver.movie_url(&ExternalId::new("a/b?c#d")).unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert!(url.path().starts_with("/3/movie/"));
        assert_eq!(url.query(), Some("language=en-US"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn dot_ids_are_rejected_without_a_request() {
        let resolver = resolver_for("http://127.0.0.1:9/3");
        for id in ["", ".", ".."] {
            let outcome = resolver.resolve_poster(&ExternalId::new(id));
            assert_eq!(outcome.reason(), Some(PlaceholderReason::Malformed), "id={id:?}");
        }
    }
}
