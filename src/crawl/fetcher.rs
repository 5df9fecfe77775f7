//! HTTP fetcher
//!
//! Thin wrapper over reqwest: builds the shared client and exposes the three
//! fetch shapes the pipeline needs (page text, document bytes, and a
//! status-checked streaming response). Any non-2xx status or connection
//! failure surfaces as [`FetchError`].

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A failed page or document fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

/// Builds the HTTP client shared by the walker and the retrieval engine
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - Transport failure or non-2xx status
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = check_status(client.get(url.clone()).send().await?)?;
    Ok(response.text().await?)
}

/// Fetches a document and returns its raw bytes
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = check_status(client.get(url.clone()).send().await?)?;
    Ok(response.bytes().await?.to_vec())
}

/// Starts a fetch and returns the status-checked response for streaming
///
/// Used by the retrieval engine, which writes the body to disk chunk by
/// chunk instead of buffering it in memory.
pub async fn fetch_stream(client: &Client, url: &Url) -> Result<Response, FetchError> {
    check_status(client.get(url.clone()).send().await?)
}

fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
            .mount(&mock_server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/page", mock_server.uri())).unwrap();

        let body = fetch_page(&client, &url).await.unwrap();
        assert_eq!(body, "<html>hello</html>");
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();

        let result = fetch_page(&client, &url).await;
        assert!(matches!(
            result,
            Err(FetchError::Status(StatusCode::NOT_FOUND))
        ));
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]),
            )
            .mount(&mock_server)
            .await;

        let client = build_http_client().unwrap();
        let url = Url::parse(&format!("{}/doc.pdf", mock_server.uri())).unwrap();

        let bytes = fetch_bytes(&client, &url).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF");
    }
}
