use crate::store::pg::PgStore;
use anyhow::Result;
use tokio::sync::OnceCell;

/// Process-wide lazily-connected Postgres store. The first request pays the
/// connection cost; success is cached for the life of the process while a
/// failed attempt is reported to that request and retried on the next one,
/// so missing credentials never crash the server.
#[derive(Default)]
pub struct SharedStore {
    cell: OnceCell<PgStore>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Result<&PgStore> {
        self.cell.get_or_try_init(PgStore::from_env).await
    }
}
