use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored product row. The article code is the stable identity; every
/// other field may be null or absent and must survive deserialization as-is.
///
/// Variant fields (`swatches`, `sizes`, `prices`, `productColor`,
/// `galleryImages`) are kept as raw JSON values because legacy rows encode
/// them inconsistently (native array vs JSON-in-a-string). Decoding to a
/// concrete shape happens in `normalize`, never here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    #[sqlx(rename = "articleCode")]
    pub article_code: String,
    pub title: Option<String>,
    pub category: Option<String>,
    #[sqlx(rename = "pdpUrl")]
    pub pdp_url: Option<String>,
    #[sqlx(rename = "regularPrice")]
    pub regular_price: Option<String>,
    #[sqlx(rename = "redPrice")]
    pub red_price: Option<String>,
    #[sqlx(rename = "yellowPrice")]
    pub yellow_price: Option<String>,
    pub prices: Option<Value>,
    pub swatches: Option<Value>,
    #[sqlx(rename = "productColor")]
    pub product_color: Option<Value>,
    pub sizes: Option<Value>,
    #[sqlx(rename = "galleryImages")]
    pub gallery_images: Option<Value>,
    #[sqlx(rename = "imageProductAlt")]
    pub image_product_alt: Option<String>,
    #[sqlx(rename = "imageProductSrc")]
    pub image_product_src: Option<String>,
    #[sqlx(rename = "imageModelAlt")]
    pub image_model_alt: Option<String>,
    #[sqlx(rename = "imageModelSrc")]
    pub image_model_src: Option<String>,
    #[sqlx(rename = "videoFallbackImage")]
    pub video_fallback_image: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: Option<String>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// One page of query results plus the paging metadata actually applied.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub total_count: i64,
    pub limit: i64,
    pub page: i64,
    pub sort: crate::catalog::params::SortColumn,
    pub direction: crate::catalog::params::SortDirection,
}
