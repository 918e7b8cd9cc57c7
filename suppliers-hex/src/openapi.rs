//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use suppliers_types::SellRate;
use suppliers_types::domain::{Supplier, SupplierId};
use suppliers_types::dto::{CreateSupplierRequest, SupplierPage, UpdateSupplierRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List suppliers, paginated by id
#[utoipa::path(
    get,
    path = "/proveedores",
    tag = "suppliers",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("per_page" = Option<u32>, Query, description = "Page size (default 10, clamped to the configured maximum)")
    ),
    responses(
        (status = 200, description = "One page of suppliers", body = SupplierPage),
        (status = 400, description = "Unparseable query")
    )
)]
async fn list_suppliers() {}

/// Create a supplier
///
/// The local debt is converted at the official sell rate fetched for this request.
#[utoipa::path(
    post,
    path = "/proveedores",
    tag = "suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = Supplier,
            headers(("x-mirror-status" = String, description = "synced or failed"))),
        (status = 400, description = "Missing or invalid field, or duplicate code"),
        (status = 500, description = "Exchange rate unavailable")
    )
)]
async fn create_supplier() {}

/// Search suppliers
///
/// Case-insensitive substring match; both criteria are combined with AND.
#[utoipa::path(
    get,
    path = "/proveedores/search",
    tag = "suppliers",
    params(
        ("nombre" = Option<String>, Query, description = "Text contained in the name (alias `name`)"),
        ("codigo" = Option<String>, Query, description = "Text contained in the code (alias `code`)")
    ),
    responses(
        (status = 200, description = "Matching suppliers ordered by id", body = Vec<Supplier>)
    )
)]
async fn search_suppliers() {}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/proveedores/{id}",
    tag = "suppliers",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier found", body = Supplier),
        (status = 404, description = "Supplier not found")
    )
)]
async fn get_supplier() {}

/// Partially update a supplier
///
/// Only name, code, email and debt_local can change; other keys are ignored.
#[utoipa::path(
    put,
    path = "/proveedores/{id}",
    tag = "suppliers",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = Supplier,
            headers(("x-mirror-status" = String, description = "synced or failed"))),
        (status = 400, description = "Invalid field or duplicate code"),
        (status = 404, description = "Supplier not found"),
        (status = 500, description = "Exchange rate unavailable")
    )
)]
async fn update_supplier() {}

/// Delete a supplier
#[utoipa::path(
    delete,
    path = "/proveedores/{id}",
    tag = "suppliers",
    params(
        ("id" = i64, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Supplier deleted",
            headers(("x-mirror-status" = String, description = "synced or failed"))),
        (status = 404, description = "Supplier not found")
    )
)]
async fn delete_supplier() {}

/// OpenAPI documentation for the Suppliers API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Supplier Ledger API",
        version = "1.0.0",
        description = "CRUD over suppliers with debts converted at the official sell rate.\n\nEvery write rewrites a CSV mirror of the whole table; the `x-mirror-status` response header reports whether that export succeeded.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_suppliers,
        create_supplier,
        search_suppliers,
        get_supplier,
        update_supplier,
        delete_supplier,
    ),
    components(
        schemas(
            Supplier,
            SupplierId,
            SupplierPage,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            SellRate,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "suppliers", description = "Supplier management operations"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/proveedores",
            "/proveedores/search",
            "/proveedores/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }
}
