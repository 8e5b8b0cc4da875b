//! Content API client and the downloaded post artifact

pub mod artifact;

use std::time::Duration;

use crate::config::ApiConfig;
use crate::content::RemotePost;
use crate::error::{Error, Result};

/// Client for the WordPress posts endpoint
pub struct ContentClient {
    client: reqwest::Client,
    posts_url: String,
}

impl ContentClient {
    /// Create a client for the configured API
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("blogpress/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            posts_url: config.posts_url(),
        })
    }

    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }

    /// Fetch the full post listing. An empty listing is not an error.
    pub async fn posts(&self) -> Result<Vec<RemotePost>> {
        tracing::debug!("GET {}", self.posts_url);
        let response = self
            .client
            .get(&self.posts_url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let posts = parse_listing(&body)?;
        tracing::info!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    /// Fetch a single post by slug
    pub async fn post(&self, slug: &str) -> Result<RemotePost> {
        tracing::debug!("GET {}?slug={}", self.posts_url, slug);
        let response = self
            .client
            .get(&self.posts_url)
            .query(&[("slug", slug)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Lookup of {} returned {}", slug, response.status());
            return Err(Error::NotFound(slug.to_string()));
        }

        let body = response.text().await?;
        first_match(parse_listing(&body)?, slug)
    }
}

/// Parse a JSON array of post records
pub fn parse_listing(body: &str) -> Result<Vec<RemotePost>> {
    serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("invalid post listing: {}", e)))
}

/// First record of a slug query, or `NotFound` when there is none
pub fn first_match(posts: Vec<RemotePost>, slug: &str) -> Result<RemotePost> {
    posts
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(slug.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_empty_listing_is_ok() {
        assert!(parse_listing("[]").unwrap().is_empty());
    }

    #[test]
    fn test_listing_must_be_an_array() {
        let err = parse_listing(r#"{"code": "rest_no_route"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let err = first_match(Vec::new(), "ghost").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "ghost"));
    }

    #[test]
    fn test_first_match() {
        let posts = parse_listing(r#"[{"slug": "a", "id": 1}, {"slug": "a", "id": 2}]"#).unwrap();
        let post = first_match(posts, "a").unwrap();
        assert_eq!(post.fields["id"], 1);
    }

    /// Local HTTP server answering slug queries: `ghost` gets a 404, `hello`
    /// a single record, anything else an empty array.
    async fn stub_api() -> ApiConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let mut len = 0;
                    while !buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf[len..]).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => len += n,
                        }
                    }

                    let request = String::from_utf8_lossy(&buf[..len]);
                    let target = request.split_whitespace().nth(1).unwrap_or("");
                    let (status, body) = if target.contains("slug=ghost") {
                        ("404 Not Found", r#"{"code":"rest_post_invalid_id"}"#)
                    } else if target.contains("slug=hello") {
                        ("200 OK", r#"[{"slug":"hello","title":{"rendered":"Hello"}}]"#)
                    } else {
                        ("200 OK", "[]")
                    };

                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        ApiConfig {
            url: format!("http://{}", addr),
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_post_lookup() {
        let client = ContentClient::new(&stub_api().await).unwrap();

        let post = client.post("hello").await.unwrap();
        assert_eq!(post.title(), Some("Hello"));

        let err = client.post("ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "ghost"));

        let err = client.post("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "missing"));
    }

    #[tokio::test]
    async fn test_empty_listing_from_server() {
        let client = ContentClient::new(&stub_api().await).unwrap();
        assert!(client.posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ContentClient::new(&ApiConfig {
            url: format!("http://{}", addr),
            ..ApiConfig::default()
        })
        .unwrap();
        assert!(matches!(client.posts().await, Err(Error::Fetch(_))));
    }

    #[test]
    fn test_client_url() {
        let client = ContentClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(
            client.posts_url(),
            "https://slogsdon.azurewebsites.net/wp-json/wp/v2/posts"
        );
    }
}
