use crate::catalog::filter::Predicate;
use crate::catalog::model::ProductRecord;
use crate::catalog::params::{SortColumn, SortDirection};
use crate::store::ProductStore;
use crate::util::env as env_util;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    PgPool, Postgres, QueryBuilder,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SELECT_COLUMNS: &str = r#""articleCode", title, category, "pdpUrl", "regularPrice", "redPrice", "yellowPrice", prices, swatches, "productColor", sizes, "galleryImages", "imageProductAlt", "imageProductSrc", "imageModelAlt", "imageModelSrc", "videoFallbackImage", "createdAt"::text AS "createdAt", "updatedAt"::text AS "updatedAt""#;

/// Postgres-backed product store.
#[derive(Clone)]
pub struct PgStore {
    pub pool: PgPool,
    table: String,
}

impl PgStore {
    // SECURITY: never include raw DSNs in tracing spans (they may contain credentials).
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str, max_connections: u32, table: String) -> Result<Self> {
        let table = validate_table_name(table)?;
        let use_prepared = env_util::env_flag("USE_PREPARED", false);
        let mut connect_options = PgConnectOptions::from_str(database_url)?;

        // Ensure TLS is enabled when DSN contains sslmode=require
        if database_url.contains("sslmode=require") && !database_url.contains("sslmode=disable") {
            connect_options = connect_options.ssl_mode(PgSslMode::Require);
        }

        if !use_prepared {
            // PgBouncer txn mode safe
            connect_options = connect_options.statement_cache_capacity(0);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(connect_options)
            .await?;
        info!(table = %table, "connected to db");
        Ok(Self { pool, table })
    }

    /// Build a store from DSN/env configuration. Errors name the missing
    /// variable instead of panicking so the caller can report them per
    /// request.
    pub async fn from_env() -> Result<Self> {
        let database_url = env_util::db_url()?;
        let max_connections: u32 = env_util::env_parse("DB_MAX_CONNS", 10u32);
        let table =
            env_util::env_opt("PRODUCTS_TABLE").unwrap_or_else(|| "products".to_string());
        Self::connect(&database_url, max_connections, table)
            .await
            .context("unable to connect to the product database")
    }

    fn push_predicates(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
        if predicates.is_empty() {
            return;
        }
        qb.push(" WHERE ");
        let mut first = true;
        for predicate in predicates {
            if !first {
                qb.push(" AND ");
            }
            first = false;
            match predicate {
                Predicate::CategoryIn(categories) => {
                    qb.push("category = ANY(");
                    qb.push_bind(categories.clone());
                    qb.push(")");
                }
                Predicate::Search(term) => {
                    let pattern = format!("%{term}%");
                    qb.push("(title ILIKE ");
                    qb.push_bind(pattern.clone());
                    qb.push(" OR \"imageModelAlt\" ILIKE ");
                    qb.push_bind(pattern);
                    qb.push(")");
                }
                Predicate::OnSale => {
                    qb.push(
                        "((\"redPrice\" IS NOT NULL AND \"redPrice\" <> '') \
                         OR (\"yellowPrice\" IS NOT NULL AND \"yellowPrice\" <> ''))",
                    );
                }
                Predicate::ColorAny(patterns) => {
                    qb.push("(");
                    for (i, token) in patterns.iter().enumerate() {
                        if i > 0 {
                            qb.push(" OR ");
                        }
                        // Swatch columns are jsonb; cast to text so ILIKE sees
                        // the serialized form the patterns were prepared for.
                        let pattern = format!("%{token}%");
                        qb.push("swatches::text ILIKE ");
                        qb.push_bind(pattern.clone());
                        qb.push(" OR \"productColor\"::text ILIKE ");
                        qb.push_bind(pattern);
                    }
                    qb.push(")");
                }
            }
        }
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn fetch_page(
        &self,
        predicates: &[Predicate],
        sort: SortColumn,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductRecord>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM \"{}\"", self.table));
        Self::push_predicates(&mut qb, predicates);
        qb.push(format!(" ORDER BY {} {}", sort.quoted_column(), direction.as_sql()));
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build_query_as::<ProductRecord>()
            .persistent(false)
            .fetch_all(&self.pool)
            .await
            .context("product page query failed")?;
        Ok(rows)
    }

    async fn count(&self, predicates: &[Predicate]) -> Result<i64> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM \"{}\"", self.table));
        Self::push_predicates(&mut qb, predicates);

        let total = qb
            .build_query_scalar::<i64>()
            .persistent(false)
            .fetch_one(&self.pool)
            .await
            .context("product count query failed")?;
        Ok(total)
    }
}

/// The table name is interpolated into SQL, so restrict it to identifier
/// characters up front.
fn validate_table_name(table: String) -> Result<String> {
    let ok = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(table)
    } else {
        Err(anyhow::anyhow!(
            "invalid PRODUCTS_TABLE {table:?}; only ASCII letters, digits and '_' are allowed"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_identifier_only() {
        assert!(validate_table_name("products".into()).is_ok());
        assert!(validate_table_name("hm_catalog_2024".into()).is_ok());
        assert!(validate_table_name(String::new()).is_err());
        assert!(validate_table_name("products; DROP TABLE x".into()).is_err());
        assert!(validate_table_name("products\"".into()).is_err());
    }
}
