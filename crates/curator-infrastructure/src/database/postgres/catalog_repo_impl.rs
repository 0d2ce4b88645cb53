// ============================================================================
// Curator Infrastructure - PostgreSQL Catalog Repository
// File: crates/curator-infrastructure/src/database/postgres/catalog_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};

use curator_core::domain::{AppCategory, AppListFilter, CatalogItem, PlatformLinks};
use curator_core::error::DomainError;
use curator_core::repositories::{CatalogBrowser, CatalogLookup};
use curator_shared::{ItemId, Page};

const APP_COLUMNS: &str = r#"
    a.id::BIGINT AS id, a.name, a.description, a.icon_url,
    c.name AS category, co.code AS country_code,
    a.ios_link, a.android_link, a.website_link
"#;

const APP_JOINS: &str = r#"
    FROM country_travelapp a
    LEFT JOIN country_appcategory c ON c.id = a.category_id
    LEFT JOIN country_country co ON co.id = a.country_id
"#;

/// $1 category name, $2 country code. Apps without a country show up in every country.
const LIST_FILTER: &str = r#"
    WHERE ($1::TEXT IS NULL OR LOWER(c.name) = LOWER($1))
      AND ($2::TEXT IS NULL OR co.code IS NULL OR UPPER(co.code) = UPPER($2))
"#;

/// Read-only adapter over the catalog tables owned by the admin backend.
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl CatalogLookup for PgCatalogRepository {
    async fn resolve(&self, ids: &[ItemId]) -> Result<HashMap<ItemId, CatalogItem>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!("SELECT {} {} WHERE a.id = ANY($1)", APP_COLUMNS, APP_JOINS);
        let rows: Vec<CatalogItemRow> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error resolving catalog items: {}", e);
                map_sqlx_error(e)
            })?;

        debug!("Resolved {}/{} catalog items", rows.len(), ids.len());
        Ok(rows
            .into_iter()
            .map(|row| {
                let item = CatalogItem::from(row);
                (item.id, item)
            })
            .collect())
    }
}

#[async_trait]
impl CatalogBrowser for PgCatalogRepository {
    async fn list_apps(&self, filter: &AppListFilter) -> Result<Page<CatalogItem>, DomainError> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {} {}", APP_JOINS, LIST_FILTER))
            .bind(filter.category.as_deref())
            .bind(filter.country.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting apps: {}", e);
                map_sqlx_error(e)
            })?;

        let sql = format!(
            "SELECT {} {} {} ORDER BY a.name, a.id LIMIT $3 OFFSET $4",
            APP_COLUMNS, APP_JOINS, LIST_FILTER
        );
        let rows: Vec<CatalogItemRow> = sqlx::query_as(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.country.as_deref())
            .bind(filter.pagination.limit() as i64)
            .bind(filter.pagination.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing apps: {}", e);
                map_sqlx_error(e)
            })?;

        Ok(Page::new(
            rows.into_iter().map(CatalogItem::from).collect(),
            total.max(0) as u64,
            filter.pagination,
        ))
    }

    async fn list_categories(&self) -> Result<Vec<AppCategory>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id::BIGINT AS id, name, description
            FROM country_appcategory
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing categories: {}", e);
            map_sqlx_error(e)
        })?;

        Ok(rows.into_iter().map(AppCategory::from).collect())
    }
}

fn map_sqlx_error(e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => DomainError::UpstreamUnavailable(format!("catalog database: {}", e)),
        other => DomainError::InternalError(format!("catalog query failed: {}", other)),
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct CatalogItemRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub category: Option<String>,
    pub country_code: Option<String>,
    pub ios_link: Option<String>,
    pub android_link: Option<String>,
    pub website_link: Option<String>,
}

impl From<CatalogItemRow> for CatalogItem {
    fn from(row: CatalogItemRow) -> Self {
        CatalogItem {
            id: row.id,
            name: row.name,
            description: row.description,
            icon_url: row.icon_url,
            category: row.category,
            country_code: row.country_code,
            links: PlatformLinks::new(row.ios_link, row.android_link, row.website_link),
        }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryRow> for AppCategory {
    fn from(row: CategoryRow) -> Self {
        AppCategory {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}
