//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Where the printed catalog data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fresh from the catalog API
    Network,
    /// Read back from the local cache
    Cache,
}

/// Envelope around every JSON document the CLI prints
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339 time the document was produced
    pub timestamp: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                source: None,
            },
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.meta.source = Some(source);
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format data as pretty-printed JSON, tagging where it came from
pub fn format_json_from<T: Serialize + ?Sized>(
    data: &T,
    source: DataSource,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).with_source(source))
}
