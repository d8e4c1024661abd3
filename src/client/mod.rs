//! Consuming-side fetcher for the product feed. One request per parameter
//! change; the caller cancels the previous in-flight request through an
//! abort handle and a cancelled fetch resolves to "no update", never an
//! error.

pub mod options;

use crate::catalog::model::ProductRecord;
use crate::catalog::params::{ListingParams, SortColumn, SortDirection};
use anyhow::{Context, Result};
use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use serde::Deserialize;

/// A page as served by the feed endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedPage {
    pub products: Vec<ProductRecord>,
    pub applied_limit: Option<i64>,
    pub sort: Option<SortColumn>,
    pub direction: Option<SortDirection>,
    pub page: Option<i64>,
    pub total_count: Option<i64>,
}

impl FeedPage {
    /// Page count for a window size, clamped to at least one page. None when
    /// the server did not report a total.
    pub fn total_pages(&self, limit: i64) -> Option<i64> {
        let total = self.total_count?;
        if limit <= 0 {
            return Some(1);
        }
        Some((total + limit - 1) / limit).map(|p| p.max(1))
    }
}

/// Outcome of one fetch attempt.
#[derive(Debug)]
pub enum FeedUpdate {
    Page(FeedPage),
    /// The request was aborted before completion; the caller keeps its
    /// current state.
    Cancelled,
}

pub struct FeedClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FeedClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fresh abort handle/registration pair; abort the handle to cancel the
    /// fetch holding the registration.
    pub fn cancel_pair() -> (AbortHandle, AbortRegistration) {
        AbortHandle::new_pair()
    }

    pub async fn fetch_products(
        &self,
        params: &ListingParams,
        abort: AbortRegistration,
    ) -> Result<FeedUpdate> {
        let request = async {
            let response = self
                .http
                .get(&self.endpoint)
                .query(&query_pairs(params))
                .send()
                .await
                .context("unable to reach the product feed")?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                let detail = if detail.trim().is_empty() {
                    "Try again shortly.".to_string()
                } else {
                    detail
                };
                anyhow::bail!("product feed unavailable ({status}). {detail}");
            }

            response
                .json::<FeedPage>()
                .await
                .context("unexpected response from product feed")
        };

        match Abortable::new(request, abort).await {
            Ok(outcome) => outcome.map(FeedUpdate::Page),
            Err(Aborted) => Ok(FeedUpdate::Cancelled),
        }
    }
}

/// Query-string pairs for sanitized parameters. Paging and sort fields are
/// always sent; filter dimensions only when they constrain something.
pub fn query_pairs(params: &ListingParams) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("limit", params.limit.to_string()),
        ("sort", params.sort.as_str().to_string()),
        ("direction", params.direction.as_str().to_string()),
        ("page", params.page.to_string()),
    ];
    let search = params.search.trim();
    if !search.is_empty() {
        pairs.push(("search", search.to_string()));
    }
    if !params.categories.is_empty() {
        pairs.push(("categories", params.categories.join(",")));
    }
    if !params.colors.is_empty() {
        pairs.push(("colors", params.colors.join(",")));
    }
    if params.sale_only {
        pairs.push(("saleOnly", "true".to_string()));
    }
    pairs
}
