use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::{validate_key, BlobBackend, StorageError};

/// Object storage reached over HTTP.
///
/// Protocol: `GET|PUT|DELETE {base}/{key}` for single objects and
/// `GET {base}/?prefix=<p>[&cursor=<c>]` returning
/// `{ "blobs": [ { "pathname": ... } ], "hasMore": bool, "cursor": ... }`.
/// Listings are followed page by page until `hasMore` is false.
/// Every request carries `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct HttpBlobBackend {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    blobs: Vec<BlobEntry>,
    #[serde(default, rename = "hasMore")]
    has_more: bool,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Deserialize)]
struct BlobEntry {
    pathname: String,
}

fn http_err(e: reqwest::Error) -> StorageError {
    StorageError::Http(e.to_string())
}

impl HttpBlobBackend {
    pub fn new(base_url: &str, token: &str) -> Arc<Self> {
        Self::with_client(Client::new(), base_url, token)
    }

    pub fn with_client(client: Client, base_url: &str, token: &str) -> Arc<Self> {
        Arc::new(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn object_url(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[async_trait]
impl BlobBackend for HttpBlobBackend {
    fn name(&self) -> &'static str {
        "blob"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let url = self.object_url(key)?;
        let resp = self.client.get(&url).bearer_auth(&self.token).send().await.map_err(http_err)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status().map_err(http_err)?;
        let bytes = resp.bytes().await.map_err(http_err)?;
        Ok(Some(bytes.to_vec()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let url = self.object_url(key)?;
        self.client
            .put(&url)
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;
        debug!(%key, "blob written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let url = self.object_url(key)?;
        let resp = self.client.delete(&url).bearer_auth(&self.token).send().await.map_err(http_err)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        resp.error_for_status().map_err(http_err)?;
        Ok(true)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut req = self.client.get(format!("{}/", self.base_url)).query(&[("prefix", prefix)]);
            if let Some(c) = &cursor {
                req = req.query(&[("cursor", c)]);
            }
            let page: ListResponse = req
                .bearer_auth(&self.token)
                .send()
                .await
                .map_err(http_err)?
                .error_for_status()
                .map_err(http_err)?
                .json()
                .await
                .map_err(http_err)?;
            // the service may ignore `prefix`
            keys.extend(page.blobs.into_iter().map(|b| b.pathname).filter(|k| k.starts_with(prefix)));
            match page.cursor {
                Some(next) if page.has_more => {
                    if cursor.as_deref() == Some(next.as_str()) {
                        return Err(StorageError::Http(format!("listing cursor did not advance: {next}")));
                    }
                    cursor = Some(next);
                }
                Some(_) | None => break,
            }
            debug!(%prefix, keys_so_far = keys.len(), "following listing cursor");
        }
        keys.sort();
        Ok(keys)
    }
}
