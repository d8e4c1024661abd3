use crate::catalog::filter::Predicate;
use crate::catalog::model::ProductRecord;
use crate::catalog::params::{SortColumn, SortDirection};
use crate::store::ProductStore;
use anyhow::Result;
use async_trait::async_trait;

/// In-memory store, primarily for tests and offline runs. Evaluates the
/// predicate set directly via `Predicate::matches`. Ties on the sort column
/// keep insertion order (stable sort).
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    records: Vec<ProductRecord>,
}

impl MemStore {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    fn filtered(&self, predicates: &[Predicate]) -> Vec<&ProductRecord> {
        self.records
            .iter()
            .filter(|r| predicates.iter().all(|p| p.matches(r)))
            .collect()
    }
}

fn sort_key(record: &ProductRecord, sort: SortColumn) -> Option<&str> {
    match sort {
        SortColumn::CreatedAt => record.created_at.as_deref(),
        SortColumn::UpdatedAt => record.updated_at.as_deref(),
    }
}

#[async_trait]
impl ProductStore for MemStore {
    async fn fetch_page(
        &self,
        predicates: &[Predicate],
        sort: SortColumn,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRecord>> {
        let mut matching = self.filtered(predicates);
        matching.sort_by(|a, b| {
            let ord = sort_key(a, sort).cmp(&sort_key(b, sort));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let offset = offset.max(0) as usize;
        let limit = limit.max(0) as usize;
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, predicates: &[Predicate]) -> Result<i64> {
        Ok(self.filtered(predicates).len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, updated: &str) -> ProductRecord {
        ProductRecord {
            article_code: code.into(),
            updated_at: Some(updated.into()),
            ..ProductRecord::default()
        }
    }

    #[tokio::test]
    async fn sorts_descending_by_default_column() {
        let store = MemStore::new(vec![
            record("a", "2024-01-01T00:00:00Z"),
            record("b", "2024-03-01T00:00:00Z"),
            record("c", "2024-02-01T00:00:00Z"),
        ]);
        let page = store
            .fetch_page(&[], SortColumn::UpdatedAt, SortDirection::Desc, 0, 10)
            .await
            .unwrap();
        let codes: Vec<_> = page.iter().map(|r| r.article_code.as_str()).collect();
        assert_eq!(codes, ["b", "c", "a"]);
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let store = MemStore::new(vec![
            record("first", "2024-01-01T00:00:00Z"),
            record("second", "2024-01-01T00:00:00Z"),
        ]);
        let page = store
            .fetch_page(&[], SortColumn::UpdatedAt, SortDirection::Desc, 0, 10)
            .await
            .unwrap();
        let codes: Vec<_> = page.iter().map(|r| r.article_code.as_str()).collect();
        assert_eq!(codes, ["first", "second"]);
    }

    #[tokio::test]
    async fn count_ignores_pagination() {
        let records = (0..45)
            .map(|i| record(&format!("a{i}"), &format!("2024-01-{:02}T00:00:00Z", i % 28 + 1)))
            .collect();
        let store = MemStore::new(records);
        assert_eq!(store.count(&[]).await.unwrap(), 45);
        let page = store
            .fetch_page(&[], SortColumn::UpdatedAt, SortDirection::Desc, 40, 20)
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
    }
}
