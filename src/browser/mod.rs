//! Link browsing session
//!
//! The page renderer is an external collaborator behind [`WebSurface`];
//! [`BrowserSession`] only tracks navigation state around it: history,
//! loading flag and progress.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;

use crate::error::{Error, Result};

pub mod http;

pub use http::HttpSurface;

/// Something that can load a page for a URL
#[async_trait]
pub trait WebSurface: Send + Sync {
    async fn load(&self, url: &Url) -> Result<PageInfo>;
}

/// Details of a loaded page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    /// URL after redirects
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub size_bytes: usize,
    pub title: Option<String>,
}

/// How a navigation ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded(PageInfo),
    /// The load timeout fired first; loading was marked finished anyway
    TimedOut { url: String },
}

/// Navigation state exposed to views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    pub current_url: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
    pub progress: f64,
}

/// Browsing session over an injected surface
pub struct BrowserSession<S: WebSurface> {
    surface: S,
    load_timeout: Duration,
    back: Vec<Url>,
    forward: Vec<Url>,
    current: Option<Url>,
    is_loading: bool,
    progress: f64,
}

impl<S: WebSurface> BrowserSession<S> {
    pub fn new(surface: S, load_timeout: Duration) -> Self {
        Self {
            surface,
            load_timeout,
            back: Vec::new(),
            forward: Vec::new(),
            current: None,
            is_loading: false,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_url: self.current.as_ref().map(Url::to_string),
            can_go_back: !self.back.is_empty(),
            can_go_forward: !self.forward.is_empty(),
            is_loading: self.is_loading,
            progress: self.progress,
        }
    }

    /// Open a new URL. Forward history is dropped on success.
    pub async fn load(&mut self, link: &str) -> Result<LoadOutcome> {
        let url = parse_link(link)?;
        let outcome = self.navigate(&url).await?;

        if let Some(previous) = self.current.replace(url) {
            self.back.push(previous);
        }
        self.forward.clear();
        Ok(outcome)
    }

    /// Go back one page; `None` when there is no history
    #[allow(dead_code)]
    pub async fn go_back(&mut self) -> Result<Option<LoadOutcome>> {
        let Some(target) = self.back.last().cloned() else {
            return Ok(None);
        };
        let outcome = self.navigate(&target).await?;

        self.back.pop();
        if let Some(previous) = self.current.replace(target) {
            self.forward.push(previous);
        }
        Ok(Some(outcome))
    }

    /// Go forward one page; `None` when there is nothing ahead
    #[allow(dead_code)]
    pub async fn go_forward(&mut self) -> Result<Option<LoadOutcome>> {
        let Some(target) = self.forward.last().cloned() else {
            return Ok(None);
        };
        let outcome = self.navigate(&target).await?;

        self.forward.pop();
        if let Some(previous) = self.current.replace(target) {
            self.back.push(previous);
        }
        Ok(Some(outcome))
    }

    /// Load the current page again
    #[allow(dead_code)]
    pub async fn reload(&mut self) -> Result<Option<LoadOutcome>> {
        match self.current.clone() {
            Some(url) => self.navigate(&url).await.map(Some),
            None => Ok(None),
        }
    }

    async fn navigate(&mut self, url: &Url) -> Result<LoadOutcome> {
        log::debug!("Navigating to {}", url);
        self.is_loading = true;
        self.progress = 0.0;

        let result = tokio::time::timeout(self.load_timeout, self.surface.load(url)).await;
        self.is_loading = false;

        match result {
            Ok(Ok(page)) => {
                self.progress = 1.0;
                Ok(LoadOutcome::Loaded(page))
            }
            Ok(Err(e)) => {
                log::warn!("Failed loading {}: {}", url, e);
                Err(e)
            }
            Err(_) => {
                log::info!(
                    "Load of {} exceeded {:?}, marking finished",
                    url,
                    self.load_timeout
                );
                Ok(LoadOutcome::TimedOut {
                    url: url.to_string(),
                })
            }
        }
    }
}

/// Accept only absolute http(s) links
fn parse_link(link: &str) -> Result<Url> {
    let url = Url::parse(link.trim())
        .map_err(|e| Error::Other(format!("Invalid link '{}': {}", link, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Other(format!(
            "Unsupported link scheme '{}' in '{}'",
            scheme, link
        ))),
    }
}
