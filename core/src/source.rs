use crate::block::{Block, BlockId};
use crate::endpoint::Endpoints;
use crate::error::{ChainError, FetchError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

/// Anything that can hand out a block for an id.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn fetch_block(&self, id: &BlockId) -> Result<Block, FetchError>;
}

/// Fetches blocks from the indexing API over HTTP.
pub struct HttpBlockSource {
    http: Client,
    endpoints: Endpoints,
    api_key: Option<String>,
}

impl HttpBlockSource {
    pub fn new(api_url: &str) -> Result<Self, ChainError> {
        Ok(Self {
            http: Client::new(),
            endpoints: Endpoints::new(api_url)?,
            api_key: None,
        })
    }

    /// Send the key as the basic-auth password on every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl BlockSource for HttpBlockSource {
    async fn fetch_block(&self, id: &BlockId) -> Result<Block, FetchError> {
        let url = self.endpoints.block(id)?;
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.basic_auth("x", Some(key));
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(Block::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves a single canned HTTP response on loopback and hands back the
    /// request line it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_fetches_block_json() {
        let (url, request) = serve_once("200 OK", r#"{"height":5,"hash":"aa"}"#).await;
        let source = HttpBlockSource::new(&url).unwrap();

        let block = source.fetch_block(&BlockId::Height(5)).await.unwrap();
        assert_eq!(block.as_json(), &json!({ "height": 5, "hash": "aa" }));
        assert!(request.await.unwrap().starts_with("GET /block/5 "));
    }

    #[tokio::test]
    async fn test_error_status_is_recoverable() {
        let (url, _request) = serve_once("404 Not Found", r#"{"error":"not found"}"#).await;
        let source = HttpBlockSource::new(&url).unwrap();

        let err = source.fetch_block(&BlockId::Height(5)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == reqwest::StatusCode::NOT_FOUND));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_non_json_body_is_recoverable() {
        let (url, _request) = serve_once("200 OK", "<html></html>").await;
        let source = HttpBlockSource::new(&url).unwrap();

        let err = source.fetch_block(&BlockId::Hash("aa".into())).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_bad_base_fails_before_request() {
        let source = HttpBlockSource::new("mailto:ops@example.com").unwrap();
        let err = source.fetch_block(&BlockId::Height(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Endpoint { .. }));
    }
}
