use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::DocumentSource;

/// Plain HTTP GET of a static document.
///
/// - One request per fetch: no retry, no backoff.
/// - Non-2xx responses are reported as `CoreError::Api` with the status.
/// - A timeout is applied only when one is configured.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout_secs: Option<u64>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch(&self, location: &str) -> Result<String, CoreError> {
        let resp = self.client.get(location).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                source_name: self.name().to_string(),
                message: format!("GET {} returned {status}", strip_query(location)),
            });
        }

        let body = resp.text().await.map_err(|e| CoreError::Api {
            source_name: self.name().to_string(),
            message: format!("Failed to read body of {}: {e}", strip_query(location)),
        })?;
        Ok(body)
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
