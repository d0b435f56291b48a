//! TMDB API client.

use crate::core::sanitizer::sanitize;
use crate::models::config::TmdbConfig;
use crate::models::media::MetadataResult;
use crate::services::credentials::{Credential, CredentialPool};
use crate::services::lookup::EpisodeLookup;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// TMDB API client.
pub struct TmdbClient {
    base_url: String,
    language: Option<String>,
    credentials: CredentialPool,
    client: reqwest::Client,
}

/// TV show search result.
#[derive(Debug, Deserialize)]
pub struct TvSearchResult {
    pub results: Vec<TvSearchItem>,
}

/// TV show search item.
#[derive(Debug, Deserialize)]
pub struct TvSearchItem {
    pub id: u64,
    pub name: String,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
}

/// Episode details.
#[derive(Debug, Deserialize)]
pub struct EpisodeDetails {
    pub id: u64,
    pub name: Option<String>,
    pub episode_number: u16,
    pub season_number: u16,
    pub air_date: Option<String>,
}

impl EpisodeDetails {
    /// Title and air date, treating blank strings as absent.
    pub fn into_metadata(self) -> MetadataResult {
        MetadataResult {
            title: non_blank(self.name),
            release_date: non_blank(self.air_date),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            credentials: CredentialPool::new(&config.api_keys),
            client: reqwest::Client::new(),
        }
    }

    /// Credentials this client rotates through.
    pub fn credentials(&self) -> &CredentialPool {
        &self.credentials
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, credential: &Credential, extra_params: &str) -> String {
        let mut params = Vec::new();
        if let Credential::ApiKey(key) = credential {
            params.push(format!("api_key={}", urlencoding::encode(key)));
        }
        if let Some(ref language) = self.language {
            params.push(format!("language={}", urlencoding::encode(language)));
        }
        if !extra_params.is_empty() {
            params.push(extra_params.to_string());
        }

        if params.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, params.join("&"))
        }
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str, credential: &Credential) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match credential {
            Credential::Bearer(token) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Credential::ApiKey(_) => request,
        }
    }

    /// GET a path with the next credential and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&mut self, path: &str, extra_params: &str) -> Result<T> {
        let credential = self
            .credentials
            .next_credential()
            .cloned()
            .ok_or(crate::Error::NoCredential)?;

        let url = self.build_url(path, &credential, extra_params);
        tracing::debug!("TMDB GET {} ({})", path, credential.masked());

        let body = self
            .build_request(&url, &credential)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Verify a single credential is accepted.
    pub async fn verify_credential(&self, credential: &Credential) -> Result<bool> {
        let url = self.build_url("authentication", credential, "");
        let resp = self.build_request(&url, credential).send().await?;
        Ok(resp.status().is_success())
    }

    /// Search for TV shows.
    pub async fn search_tv(&mut self, query: &str) -> Result<Vec<TvSearchItem>> {
        let resp: TvSearchResult = self
            .get_json("search/tv", &format!("query={}", urlencoding::encode(query)))
            .await?;
        Ok(resp.results)
    }

    /// Get episode details.
    pub async fn get_episode_details(
        &mut self,
        tv_id: u64,
        season_number: u16,
        episode_number: u16,
    ) -> Result<EpisodeDetails> {
        self.get_json(
            &format!("tv/{}/season/{}/episode/{}", tv_id, season_number, episode_number),
            "",
        )
        .await
    }

    /// Search the show and fetch the episode. The first search hit wins.
    pub async fn fetch_episode(
        &mut self,
        show_name: &str,
        season: u16,
        episode: u16,
    ) -> Result<MetadataResult> {
        let query = sanitize(show_name, false);
        let results = self.search_tv(&query).await?;

        let show = results
            .into_iter()
            .next()
            .ok_or_else(|| crate::Error::TvShowNotFound(show_name.to_string()))?;

        tracing::debug!("Matched '{}' to TMDB show {} ({})", query, show.id, show.name);

        let details = self.get_episode_details(show.id, season, episode).await?;
        Ok(details.into_metadata())
    }
}

impl EpisodeLookup for TmdbClient {
    async fn lookup_episode(
        &mut self,
        show_name: &str,
        season: u16,
        episode: u16,
    ) -> MetadataResult {
        match self.fetch_episode(show_name, season, episode).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(
                    "TMDB lookup failed for {} S{:02}E{:02}: {}",
                    show_name,
                    season,
                    episode,
                    e
                );
                MetadataResult::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn config(keys: &[&str], language: Option<&str>) -> TmdbConfig {
        TmdbConfig {
            api_keys: keys.iter().map(|k| k.to_string()).collect(),
            base_url: "https://api.example.org/3/".to_string(),
            language: language.map(str::to_string),
        }
    }

    const SEARCH_BODY: &str = r#"{"page": 1, "results": [
        {"id": 1396, "name": "Breaking Bad"},
        {"id": 9999, "name": "Breaking Bad Redux"}
    ]}"#;

    const EPISODE_BODY: &str = r#"{
        "id": 62085,
        "name": "Pilot",
        "episode_number": 1,
        "season_number": 1,
        "air_date": "2008-01-20"
    }"#;

    /// Local HTTP server answering one request per canned response, in order.
    ///
    /// Returns the base URL and a handle yielding the raw request heads.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }
                requests.push(String::from_utf8_lossy(&head).into_owned());

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            requests
        });

        (format!("http://{}/3", addr), handle)
    }

    fn local_client(base_url: &str, keys: &[&str]) -> TmdbClient {
        TmdbClient::new(&TmdbConfig {
            base_url: base_url.to_string(),
            ..config(keys, None)
        })
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    #[test]
    fn test_build_url_with_api_key() {
        let client = TmdbClient::new(&config(&["k1"], Some("en-US")));
        let url = client.build_url(
            "search/tv",
            &Credential::ApiKey("k1".to_string()),
            "query=Breaking%20Bad",
        );
        assert_eq!(
            url,
            "https://api.example.org/3/search/tv?api_key=k1&language=en-US&query=Breaking%20Bad"
        );
    }

    #[test]
    fn test_build_url_with_bearer() {
        let client = TmdbClient::new(&config(&[], None));
        let url = client.build_url(
            "tv/1396/season/1/episode/1",
            &Credential::Bearer("eyJx".to_string()),
            "",
        );
        assert_eq!(url, "https://api.example.org/3/tv/1396/season/1/episode/1");
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 1396,
                    "name": "Breaking Bad",
                    "original_name": "Breaking Bad",
                    "first_air_date": "2008-01-20"
                },
                {"id": 9999, "name": "Breaking Bad Redux"}
            ],
            "total_results": 2
        }"#;
        let parsed: TvSearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].id, 1396);
        assert!(parsed.results[1].first_air_date.is_none());
    }

    #[test]
    fn test_episode_into_metadata() {
        let json = r#"{
            "id": 62085,
            "name": "Pilot",
            "episode_number": 1,
            "season_number": 1,
            "air_date": "2008-01-20"
        }"#;
        let details: EpisodeDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.into_metadata(),
            MetadataResult {
                title: Some("Pilot".to_string()),
                release_date: Some("2008-01-20".to_string()),
            }
        );
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let json =
            r#"{"id": 1, "name": "", "episode_number": 2, "season_number": 1, "air_date": null}"#;
        let details: EpisodeDetails = serde_json::from_str(json).unwrap();
        assert!(details.into_metadata().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_without_credentials_degrades() {
        let mut client = TmdbClient::new(&config(&[], None));
        let result = client.lookup_episode("Breaking.Bad", 1, 1).await;
        assert_eq!(result, MetadataResult::default());
    }

    #[tokio::test]
    async fn test_lookup_uses_first_search_hit() {
        let (base_url, server) = serve(vec![(200, SEARCH_BODY), (200, EPISODE_BODY)]).await;
        let mut client = local_client(&base_url, &["k1", "k2"]);

        let result = client.lookup_episode("Breaking.Bad", 1, 1).await;

        assert_eq!(
            result,
            MetadataResult {
                title: Some("Pilot".to_string()),
                release_date: Some("2008-01-20".to_string()),
            }
        );

        let requests = server.await.unwrap();
        assert_eq!(
            request_line(&requests[0]),
            "GET /3/search/tv?api_key=k1&query=Breaking%20Bad HTTP/1.1"
        );
        // Second call rotates to the next key
        assert_eq!(
            request_line(&requests[1]),
            "GET /3/tv/1396/season/1/episode/1?api_key=k2 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_bearer_token_goes_in_header() {
        let token = "eyJhbGciOiJIUzI1NiJ9.test";
        let (base_url, server) = serve(vec![(200, SEARCH_BODY), (200, EPISODE_BODY)]).await;
        let mut client = local_client(&base_url, &[token]);

        let result = client.lookup_episode("Breaking Bad", 1, 1).await;
        assert_eq!(result.title.as_deref(), Some("Pilot"));

        let requests = server.await.unwrap();
        assert_eq!(
            request_line(&requests[0]),
            "GET /3/search/tv?query=Breaking%20Bad HTTP/1.1"
        );
        for request in &requests {
            assert!(!request.contains("api_key="));
            assert!(request
                .to_lowercase()
                .contains(&format!("authorization: bearer {}", token.to_lowercase())));
        }
    }

    #[tokio::test]
    async fn test_no_search_results_degrades() {
        let (base_url, server) = serve(vec![(200, r#"{"page": 1, "results": []}"#)]).await;
        let mut client = local_client(&base_url, &["k1"]);

        let err = client.fetch_episode("Nonexistent Show", 1, 1).await.unwrap_err();
        assert!(matches!(err, crate::Error::TvShowNotFound(_)));
        server.await.unwrap();

        let (base_url, server) = serve(vec![(200, r#"{"page": 1, "results": []}"#)]).await;
        let mut client = local_client(&base_url, &["k1"]);
        let result = client.lookup_episode("Nonexistent Show", 1, 1).await;
        assert_eq!(result, MetadataResult::default());

        // Only the search was issued
        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_status_degrades() {
        let body = r#"{"status_code": 7, "status_message": "Invalid API key"}"#;
        let (base_url, server) = serve(vec![(401, body)]).await;
        let mut client = local_client(&base_url, &["bad"]);

        assert!(matches!(
            client.fetch_episode("Breaking Bad", 1, 1).await,
            Err(crate::Error::Http(_))
        ));
        server.await.unwrap();

        let (base_url, server) = serve(vec![(401, body)]).await;
        let mut client = local_client(&base_url, &["bad"]);
        let result = client.lookup_episode("Breaking Bad", 1, 1).await;
        assert_eq!(result, MetadataResult::default());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_degrades() {
        let (base_url, server) = serve(vec![(200, SEARCH_BODY), (200, "{not json")]).await;
        let mut client = local_client(&base_url, &["k1"]);

        assert!(matches!(
            client.fetch_episode("Breaking Bad", 1, 1).await,
            Err(crate::Error::Json(_))
        ));
        server.await.unwrap();

        let (base_url, server) = serve(vec![(200, "<html>oops</html>")]).await;
        let mut client = local_client(&base_url, &["k1"]);
        let result = client.lookup_episode("Breaking Bad", 1, 1).await;
        assert_eq!(result, MetadataResult::default());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_credential_reports_status() {
        let (base_url, server) = serve(vec![(200, r#"{"success": true}"#), (401, "{}")]).await;
        let client = local_client(&base_url, &[]);

        let good = Credential::ApiKey("good".to_string());
        let bad = Credential::ApiKey("bad".to_string());
        assert!(client.verify_credential(&good).await.unwrap());
        assert!(!client.verify_credential(&bad).await.unwrap());

        let requests = server.await.unwrap();
        assert_eq!(
            request_line(&requests[0]),
            "GET /3/authentication?api_key=good HTTP/1.1"
        );
    }
}
