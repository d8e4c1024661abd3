pub mod lazy;
pub mod memory;
pub mod pg;

use crate::catalog::filter::Predicate;
use crate::catalog::model::ProductRecord;
use crate::catalog::params::{SortColumn, SortDirection};
use anyhow::Result;
use async_trait::async_trait;

pub use lazy::SharedStore;
pub use memory::MemStore;
pub use pg::PgStore;

/// Read-only seam over the product dataset. Implementations translate the
/// predicate set into their own query form; ordering beyond the sort column
/// is store-defined.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn fetch_page(
        &self,
        predicates: &[Predicate],
        sort: SortColumn,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRecord>>;

    /// Count of all records matching the predicates, independent of any
    /// pagination window.
    async fn count(&self, predicates: &[Predicate]) -> Result<i64>;
}
