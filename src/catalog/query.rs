//! Query execution: predicates + sort + pagination window against a store.

use crate::catalog::filter::build_predicates;
use crate::catalog::model::ProductPage;
use crate::catalog::params::ListingParams;
use crate::store::ProductStore;
use anyhow::Result;
use tracing::debug;

/// Run one sanitized listing request. The count is taken before the window
/// is applied so `total_count` reflects the whole filtered set, and the
/// effective parameters are echoed back so callers can reconcile what was
/// actually applied.
pub async fn run_listing(store: &dyn ProductStore, params: &ListingParams) -> Result<ProductPage> {
    let predicates = build_predicates(params);
    debug!(
        predicates = predicates.len(),
        sort = params.sort.as_str(),
        direction = params.direction.as_str(),
        page = params.page,
        limit = params.limit,
        "executing listing query"
    );

    let total_count = store.count(&predicates).await?;
    let products = store
        .fetch_page(
            &predicates,
            params.sort,
            params.direction,
            params.offset(),
            params.limit,
        )
        .await?;

    Ok(ProductPage {
        products,
        total_count,
        limit: params.limit,
        page: params.page,
        sort: params.sort,
        direction: params.direction,
    })
}
