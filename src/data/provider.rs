use anyhow::Result;
use async_trait::async_trait;

/// Abstract source of the raw delimited price text.
///
/// The pipeline never performs network I/O itself; the host application
/// supplies a provider (HTTP fetch, file read, embedded fixture) and the
/// pipeline suspends on it once per load cycle.
#[async_trait]
pub trait RawSeriesProvider: Send + Sync {
    async fn fetch_raw(&self) -> Result<String>;
}

/// Provider serving a fixed in-memory document. Used by tests and demos.
pub struct StaticTextProvider {
    text: String,
}

impl StaticTextProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl RawSeriesProvider for StaticTextProvider {
    async fn fetch_raw(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
