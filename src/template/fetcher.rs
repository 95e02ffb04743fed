// Template fetchers - per-scheme strategies for retrieving template text

use crate::template::embedded::{default_templates, DEFAULT_BUNDLE_NAME};
use crate::NagError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Fetch strategy for one locator scheme.
///
/// New schemes are added by registering another fetcher on the resolver;
/// unmatched schemes fall through to the HTTP fetcher.
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// The locator scheme this fetcher serves
    fn scheme(&self) -> &'static str;

    /// Fetch the template text the locator points at
    async fn fetch(&self, locator: &Url) -> Result<String, NagError>;
}

/// Serves `embedded://` locators from compiled-in template bundles.
///
/// The authority selects the bundle: empty or "self" is the default
/// bundle; any other authority must name a registered bundle. The path
/// (leading separators trimmed) is the resource key.
pub struct EmbeddedFetcher {
    bundles: HashMap<&'static str, &'static [(&'static str, &'static str)]>,
}

impl EmbeddedFetcher {
    pub fn new() -> Self {
        let mut bundles = HashMap::new();
        bundles.insert(DEFAULT_BUNDLE_NAME, default_templates());
        Self { bundles }
    }

    /// Register an additional named bundle
    pub fn with_bundle(
        mut self,
        name: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        self.bundles.insert(name, entries);
        self
    }
}

impl Default for EmbeddedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateFetcher for EmbeddedFetcher {
    fn scheme(&self) -> &'static str {
        "embedded"
    }

    async fn fetch(&self, locator: &Url) -> Result<String, NagError> {
        let authority = locator.host_str().unwrap_or("");
        let bundle_name = match authority {
            "" | "self" => DEFAULT_BUNDLE_NAME,
            other => other,
        };
        let key = locator.path().trim_start_matches('/');

        let not_found = || NagError::ResourceNotFound {
            bundle: authority.to_string(),
            key: key.to_string(),
        };

        self.bundles
            .get(bundle_name)
            .and_then(|entries| entries.iter().find(|(entry_key, _)| *entry_key == key))
            .map(|(_, content)| content.to_string())
            .ok_or_else(not_found)
    }
}

/// Serves `s3://bucket/key` locators from object storage.
pub struct S3Fetcher {
    client: aws_sdk_s3::Client,
}

impl S3Fetcher {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TemplateFetcher for S3Fetcher {
    fn scheme(&self) -> &'static str {
        "s3"
    }

    async fn fetch(&self, locator: &Url) -> Result<String, NagError> {
        let bucket = locator
            .host_str()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| NagError::StorageFetch {
                bucket: String::new(),
                key: locator.path().to_string(),
                detail: "locator has no bucket".to_string(),
            })?
            .to_string();
        let key = locator.path().trim_start_matches('/').to_string();

        let storage_err = |detail: String| NagError::StorageFetch {
            bucket: bucket.clone(),
            key: key.clone(),
            detail,
        };

        let object = self
            .client
            .get_object()
            .bucket(bucket.as_str())
            .key(key.as_str())
            .send()
            .await
            .map_err(|e| storage_err(e.to_string()))?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| storage_err(e.to_string()))?
            .into_bytes();

        String::from_utf8(bytes.to_vec()).map_err(|e| storage_err(e.to_string()))
    }
}

/// Serves `http(s)://` locators with a plain GET; also the fallback for
/// any scheme no other fetcher claims.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateFetcher for HttpFetcher {
    fn scheme(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, locator: &Url) -> Result<String, NagError> {
        let network_err = |detail: String| NagError::NetworkFetch {
            url: locator.to_string(),
            detail,
        };

        let response = self
            .client
            .get(locator.as_str())
            .send()
            .await
            .map_err(|e| network_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network_err(format!("status {}", response.status())));
        }

        response.text().await.map_err(|e| network_err(e.to_string()))
    }
}
