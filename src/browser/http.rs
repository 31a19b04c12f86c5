//! Headless page loader used by the CLI

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url, header::CONTENT_TYPE};

use super::{PageInfo, WebSurface};
use crate::error::{ApiError, Result};

/// Loads pages over HTTP and reports what came back
pub struct HttpSurface {
    http: HttpClient,
}

impl HttpSurface {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("pubapi/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl WebSurface for HttpSurface {
    async fn load(&self, url: &Url) -> Result<PageInfo> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(ApiError::from)?;
        let title = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("html"))
            .then(|| extract_title(&body))
            .flatten();

        Ok(PageInfo {
            url: final_url,
            status,
            content_type,
            size_bytes: body.len(),
            title,
        })
    }
}

/// Text of the first `<title>` element, whitespace-collapsed
fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;

    let title = html[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}
