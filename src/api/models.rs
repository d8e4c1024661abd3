// API request/response models (DTOs)

use crate::catalog::model::{ProductPage, ProductRecord};
use crate::catalog::params::{SortColumn, SortDirection};
use serde::{Deserialize, Serialize};

/// Successful listing response. Field names stay camelCase on the wire so
/// existing feed consumers keep working.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<ProductRecord>,
    pub applied_limit: i64,
    pub sort: SortColumn,
    pub direction: SortDirection,
    pub page: i64,
    pub total_count: i64,
}

impl From<ProductPage> for ProductsResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.products,
            applied_limit: page.limit,
            sort: page.sort,
            direction: page.direction,
            page: page.page,
            total_count: page.total_count,
        }
    }
}

/// Failure response; one human-readable message, no partial data.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_response_serializes_camel_case() {
        let page = ProductPage {
            products: vec![],
            total_count: 45,
            limit: 20,
            page: 2,
            sort: SortColumn::UpdatedAt,
            direction: SortDirection::Desc,
        };
        let body = serde_json::to_value(ProductsResponse::from(page)).unwrap();
        assert_eq!(body["appliedLimit"], 20);
        assert_eq!(body["totalCount"], 45);
        assert_eq!(body["sort"], "updatedAt");
        assert_eq!(body["direction"], "desc");
        assert_eq!(body["page"], 2);
        assert!(body["products"].as_array().unwrap().is_empty());
    }
}
