//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use suppliers_types::{
    AppError, CreateSupplierRequest, ListParams, SearchParams, SupplierId, SupplierRepository,
    UpdateSupplierRequest,
};

use crate::openapi::ApiDoc;
use crate::service::MirrorStatus;
use crate::SupplierService;

/// Response header reporting whether the mirror caught up with a write.
pub const MIRROR_STATUS_HEADER: HeaderName = HeaderName::from_static("x-mirror-status");

/// Application state shared across handlers.
pub struct AppState<R: SupplierRepository> {
    pub service: SupplierService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::RateUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Exchange rate unavailable: {}", msg),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_id(raw: &str) -> Result<SupplierId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(AppError::BadRequest("Invalid supplier ID".into())))
}

fn mirror_header(status: MirrorStatus) -> [(HeaderName, &'static str); 1] {
    [(MIRROR_STATUS_HEADER, status.as_str())]
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// List suppliers, one page at a time.
#[tracing::instrument(skip(state, params))]
pub async fn list_suppliers<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let page = state.service.list_suppliers(params).await?;
    Ok(Json(page))
}

/// Search suppliers by name and/or code.
#[tracing::instrument(skip(state, params))]
pub async fn search_suppliers<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let suppliers = state.service.search_suppliers(params).await?;
    Ok(Json(suppliers))
}

/// Get supplier by ID.
#[tracing::instrument(skip(state), fields(supplier_id = %id))]
pub async fn get_supplier<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier_id = parse_id(&id)?;
    let supplier = state.service.get_supplier(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a supplier.
#[tracing::instrument(skip(state, body))]
pub async fn create_supplier<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<CreateSupplierRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let created = state.service.create_supplier(req).await?;
    Ok((
        StatusCode::CREATED,
        mirror_header(created.mirror),
        Json(created.value),
    ))
}

/// Partially update a supplier.
#[tracing::instrument(skip(state, body), fields(supplier_id = %id))]
pub async fn update_supplier<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSupplierRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier_id = parse_id(&id)?;
    let Json(req) = body?;
    let updated = state.service.update_supplier(supplier_id, req).await?;
    Ok((mirror_header(updated.mirror), Json(updated.value)))
}

/// Delete a supplier.
#[tracing::instrument(skip(state), fields(supplier_id = %id))]
pub async fn delete_supplier<R: SupplierRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier_id = parse_id(&id)?;
    let deleted = state.service.delete_supplier(supplier_id).await?;
    Ok((StatusCode::NO_CONTENT, mirror_header(deleted.mirror)))
}
