//! Remote collection endpoint
//!
//! Defines the fetch/post capability the coordinator talks to, and the
//! HTTP implementation of it.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::quotes::Quote;

/// Remote collection capability
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the remote collection
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, TransportError>;

    /// Send one newly added quote
    async fn post_quote(&self, quote: &Quote) -> Result<(), TransportError>;
}

/// Remote collection served over HTTP as a JSON array
pub struct HttpRemote {
    client: reqwest::Client,
    url: String,
    default_category: String,
}

impl HttpRemote {
    pub fn new(url: &str, default_category: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            url: url.to_string(),
            default_category: default_category.to_string(),
        })
    }

    fn network_error(&self, e: reqwest::Error) -> TransportError {
        TransportError::Network {
            url: self.url.clone(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, TransportError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        decode_remote_quotes(body, &self.default_category)
    }

    async fn post_quote(&self, quote: &Quote) -> Result<(), TransportError> {
        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.url)
            .json(quote)
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

/// Turn a remote payload into quotes
///
/// The payload must be an array. Entries without a non-blank string `text`
/// are skipped; a missing or blank `category` becomes `default_category`.
/// Text is kept byte-for-byte, since it is the quote's identity.
pub fn decode_remote_quotes(body: Value, default_category: &str) -> Result<Vec<Quote>, TransportError> {
    let entries = match body {
        Value::Array(entries) => entries,
        other => {
            return Err(TransportError::Decode(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = entries.len();
    let quotes: Vec<Quote> = entries
        .into_iter()
        .filter_map(|entry| {
            let text = entry.get("text")?.as_str()?;
            if text.trim().is_empty() {
                return None;
            }
            let category = entry
                .get("category")
                .and_then(Value::as_str)
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(default_category);
            Some(Quote {
                text: text.to_string(),
                category: category.to_string(),
            })
        })
        .collect();

    if quotes.len() < total {
        tracing::debug!("Skipped {} remote entries without text", total - quotes.len());
    }

    Ok(quotes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
