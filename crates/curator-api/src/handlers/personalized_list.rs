// ============================================================================
// Curator API - Personalized List Handlers
// File: crates/curator-api/src/handlers/personalized_list.rs
// ============================================================================
//! Session-scoped app lists and the artifacts derived from them

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;
use validator::Validate;

use curator_core::artifacts::{ExportDocument, ExportFormat};
use curator_core::domain::{ItemRef, SessionId};
use curator_core::error::DomainError;
use curator_core::services::QrArtifact;

use crate::dto::{
    CreatedListResponse, ExportQuery, SelectionRequest, SessionCreatedResponse, SessionListResponse,
    ShareUrlResponse,
};
use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

fn parse_selection(payload: Result<Json<SelectionRequest>, JsonRejection>) -> ApiResult<SelectionRequest> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(request)
}

fn attachment(content_type: &str, file_name: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

fn document_response(doc: ExportDocument) -> Response {
    attachment(doc.content_type, &doc.file_name, doc.body)
}

/// Create list handler - POST /api/v1/personalized-list
pub async fn create_list(
    State(state): State<AppState>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CreatedListResponse>>)> {
    let request = parse_selection(payload)?;
    let list = state.sessions.create_session(&request.selected_apps).await?;
    info!("Personalized list created with {} apps", list.items.len());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedListResponse::from(list))),
    ))
}

/// Empty list handler - POST /api/v1/sessions
pub async fn init_empty(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SessionCreatedResponse>>)> {
    let session_id = state.sessions.init_empty().await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SessionCreatedResponse { session_id })),
    ))
}

/// Get list handler - GET /api/v1/personalized-list/{session_id}
pub async fn get_list(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ApiResponse<SessionListResponse>>> {
    let session_id: SessionId = session_id.parse()?;
    let selected_apps = state.sessions.get_items(&session_id).await?;

    Ok(Json(ApiResponse::success(SessionListResponse {
        session_id,
        selected_apps,
    })))
}

/// Replace list handler - PUT /api/v1/personalized-list/{session_id}
pub async fn replace_list(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Vec<ItemRef>>>> {
    let session_id: SessionId = session_id.parse()?;
    let request = parse_selection(payload)?;
    let items = state
        .sessions
        .replace_items(&session_id, &request.selected_apps)
        .await?;

    Ok(Json(ApiResponse::success(items)))
}

/// Delete list handler - DELETE /api/v1/personalized-list/{session_id}
pub async fn delete_list(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    let session_id: SessionId = session_id.parse()?;
    if state.sessions.delete(&session_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DomainError::SessionNotFound.into())
    }
}

/// Share link handler - GET /api/v1/personalized-list/share-url/{session_id}
pub async fn share_url(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ApiResponse<ShareUrlResponse>>> {
    let session_id: SessionId = session_id.parse()?;
    let shareable_url = state.share.shareable_url(&session_id).await?;
    Ok(Json(ApiResponse::success(ShareUrlResponse { shareable_url })))
}

/// QR handler - GET /api/v1/personalized-list/qr/{session_id}
pub async fn qr_code(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ApiResponse<QrArtifact>>> {
    let session_id: SessionId = session_id.parse()?;
    let artifact = state.share.qr_code(&session_id).await?;
    Ok(Json(ApiResponse::success(artifact)))
}

/// QR download handler - GET /api/v1/personalized-list/download-qr/{session_id}
pub async fn download_qr(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Response> {
    let session_id: SessionId = session_id.parse()?;
    let png = state.share.qr_png(&session_id).await?;
    Ok(attachment(
        "image/png",
        &format!("app_list_qr_{}.png", session_id),
        png,
    ))
}

/// Export handler - GET /api/v1/personalized-list/export/{session_id}
pub async fn export_list(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let session_id: SessionId = session_id.parse()?;
    let Query(query) = query?;
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let inline_icons = query.inline_icons.unwrap_or(state.inline_icons);

    let doc = state.share.export(&session_id, format, inline_icons).await?;
    Ok(document_response(doc))
}

/// Text download handler - GET /api/v1/personalized-list/download-text/{session_id}
pub async fn download_text(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Response> {
    let session_id: SessionId = session_id.parse()?;
    let doc = state.share.export(&session_id, ExportFormat::Text, false).await?;
    Ok(document_response(doc))
}

/// Embed handler - GET /api/v1/personalized-list/embed/{session_id}
pub async fn embed_snippet(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Html<String>> {
    let session_id: SessionId = session_id.parse()?;
    Ok(Html(state.share.embed_snippet(&session_id).await?))
}
