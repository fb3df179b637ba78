use crate::block::BlockId;
use crate::error::{ChainError, FetchError};
use reqwest::Url;

/// Builds resource URLs on the indexing API.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(api_url: &str) -> Result<Self, ChainError> {
        let base = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| ChainError::InvalidApiUrl(format!("{}: {}", api_url, e)))?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<api_url>/block/<height or hash>`. The id is percent-encoded as a
    /// single path segment.
    pub fn block(&self, id: &BlockId) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Endpoint {
                id: id.to_string(),
                reason: format!("{} cannot be a base url", self.base),
            })?
            .pop_if_empty()
            .push("block")
            .push(&id.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_by_height() {
        let endpoints = Endpoints::new("http://127.0.0.1:8332").unwrap();
        let url = endpoints.block(&BlockId::Height(100)).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8332/block/100");
    }

    #[test]
    fn test_block_by_hash_under_prefix() {
        let endpoints = Endpoints::new("https://indexer.example/api/v1/").unwrap();
        let url = endpoints.block(&BlockId::Hash("00ab".into())).unwrap();
        assert_eq!(url.as_str(), "https://indexer.example/api/v1/block/00ab");
    }

    #[test]
    fn test_hash_is_a_single_segment() {
        let endpoints = Endpoints::new("http://localhost").unwrap();
        let url = endpoints.block(&BlockId::Hash("a/b?c".into())).unwrap();
        assert_eq!(url.as_str(), "http://localhost/block/a%2Fb%3Fc");
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(ChainError::InvalidApiUrl(_))
        ));
    }

    #[test]
    fn test_cannot_be_a_base() {
        let endpoints = Endpoints::new("mailto:ops@example.com").unwrap();
        let err = endpoints.block(&BlockId::Height(1)).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
