//! Read-only catalog browsing

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use curator_core::domain::{AppCategory, AppListFilter, CatalogItem, CountryPage};
use curator_shared::{Page, Pagination};
use tracing::debug;

use crate::dto::AppListQuery;
use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// List apps handler - GET /api/v1/apps
pub async fn list_apps(
    State(state): State<AppState>,
    query: Result<Query<AppListQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Page<CatalogItem>>>> {
    let Query(query) = query?;
    let page = state.catalog.list_apps(&filter_from(query, None)).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Country page handler - GET /api/v1/country/{country_code}
pub async fn country_page(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
    query: Result<Query<AppListQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<CountryPage>>> {
    let code = CountryPage::parse_code(&country_code)?;
    let Query(query) = query?;

    let categories = state.catalog.list_categories().await?;
    let apps = state
        .catalog
        .list_apps(&filter_from(query, Some(code.clone())))
        .await?;
    debug!("Country page {} lists {} of {} apps", code, apps.items.len(), apps.total);

    Ok(Json(ApiResponse::success(CountryPage::build(&code, categories, apps))))
}

fn filter_from(query: AppListQuery, country: Option<String>) -> AppListFilter {
    AppListFilter {
        category: query
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        country,
        pagination: Pagination::from_query(query.page, query.per_page),
    }
}

/// List categories handler - GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<AppCategory>>>> {
    Ok(Json(ApiResponse::success(state.catalog.list_categories().await?)))
}
