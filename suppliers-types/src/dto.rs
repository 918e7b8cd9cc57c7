//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request bodies use the English field names and also accept the legacy
//! Spanish keys (`nombre`, `codigo`, `mail`, `deuda_pesos`).

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::supplier::{
    CODE_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN, optional_text, required_text, valid_debt,
};
use crate::domain::{Supplier, SupplierDraft, SupplierFilter, SupplierPatch};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Supplier DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a supplier.
///
/// Every field is required; they are optional here so that a missing field is
/// reported by name instead of as a generic body error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateSupplierRequest {
    #[serde(default, alias = "nombre", skip_serializing_if = "Option::is_none")]
    #[schema(example = "Acme")]
    pub name: Option<String>,
    #[serde(default, alias = "codigo", skip_serializing_if = "Option::is_none")]
    #[schema(example = "AC1")]
    pub code: Option<String>,
    #[serde(default, alias = "mail", skip_serializing_if = "Option::is_none")]
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    /// Debt in local currency
    #[serde(default, alias = "deuda_pesos", skip_serializing_if = "Option::is_none")]
    #[schema(example = 1000.0)]
    pub debt_local: Option<f64>,
}

impl CreateSupplierRequest {
    /// Checks required fields in the order name, code, email, debt_local and
    /// stops at the first missing one.
    pub fn validate(self) -> Result<SupplierDraft, DomainError> {
        let name = required_text("name", self.name, NAME_MAX_LEN)?;
        let code = required_text("code", self.code, CODE_MAX_LEN)?;
        let email = required_text("email", self.email, EMAIL_MAX_LEN)?;
        let debt_local = self
            .debt_local
            .ok_or(DomainError::MissingField("debt_local"))?;
        let debt_local = valid_debt("debt_local", debt_local)?;

        Ok(SupplierDraft {
            name,
            code,
            email,
            debt_local,
        })
    }
}

/// Request to partially update a supplier.
///
/// Only these fields can change. Unknown keys in the body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSupplierRequest {
    #[serde(default, alias = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, alias = "mail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New debt in local currency; triggers a fresh conversion
    #[serde(default, alias = "deuda_pesos", skip_serializing_if = "Option::is_none")]
    pub debt_local: Option<f64>,
}

impl UpdateSupplierRequest {
    pub fn validate(self) -> Result<SupplierPatch, DomainError> {
        Ok(SupplierPatch {
            name: optional_text("name", self.name, NAME_MAX_LEN)?,
            code: optional_text("code", self.code, CODE_MAX_LEN)?,
            email: optional_text("email", self.email, EMAIL_MAX_LEN)?,
            debt_local: self
                .debt_local
                .map(|d| valid_debt("debt_local", d))
                .transpose()?,
        })
    }
}

/// Query parameters for the paginated list.
///
/// Values are read leniently: anything that is not an integer falls back to
/// the default, negatives become zero and oversized numbers saturate. The
/// result is then clamped by [`PageRequest`](crate::PageRequest).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<i128>().ok())
        .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)))
}

/// Query parameters for search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, alias = "code", skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
}

impl SearchParams {
    pub fn into_filter(self) -> SupplierFilter {
        SupplierFilter::new(self.nombre, self.codigo)
    }
}

/// One page of suppliers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierPage {
    pub items: Vec<Supplier>,
    /// Total number of suppliers
    #[schema(example = 42)]
    pub total: i64,
    /// Total number of pages at this page size
    #[schema(example = 5)]
    pub pages: i64,
    #[schema(example = 1)]
    pub current_page: u32,
}
