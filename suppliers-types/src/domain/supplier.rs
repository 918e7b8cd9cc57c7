//! Supplier domain model.

use chrono::{DateTime, SubsecRound, Utc};
use exchange_rates::SellRate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

pub const NAME_MAX_LEN: usize = 100;
pub const CODE_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 120;

/// Store-assigned identifier for a Supplier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct SupplierId(i64);

impl SupplierId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database key.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SupplierId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A local-currency debt together with its foreign conversion, fixed at the
/// moment the rate was fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtSnapshot {
    pub local: f64,
    pub foreign: f64,
    pub recorded_at: DateTime<Utc>,
}

impl DebtSnapshot {
    /// Converts `local` at `rate`, stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the finest precision every
    /// backend stores, so a record reads back exactly as it was written.
    ///
    /// A tiny rate can push the quotient past `f64::MAX`; that result is
    /// rejected rather than stored as infinity.
    pub fn convert(local: f64, rate: SellRate) -> Result<Self, DomainError> {
        let foreign = rate.to_foreign(local);
        if !foreign.is_finite() {
            return Err(DomainError::InvalidField {
                field: "debt_local",
                reason: format!("cannot be converted at rate {}", rate),
            });
        }
        Ok(Self {
            local,
            foreign,
            recorded_at: Utc::now().trunc_subsecs(6),
        })
    }
}

/// A supplier record as owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: SupplierId,
    #[schema(example = "Acme")]
    pub name: String,
    /// Unique across all suppliers
    #[schema(example = "AC1")]
    pub code: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Debt in local currency
    #[schema(example = 1000.0)]
    pub debt_local: f64,
    /// Debt in the reference foreign currency at the rate of the last debt write
    #[schema(example = 1.0)]
    pub debt_foreign: Option<f64>,
    /// Time of the last debt write
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Creates a supplier with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: SupplierId,
        name: String,
        code: String,
        email: String,
        debt_local: f64,
        debt_foreign: Option<f64>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            code,
            email,
            debt_local,
            debt_foreign,
            updated_at,
        }
    }

    /// Applies allow-listed changes.
    ///
    /// `updated_at` only moves when the debt changes.
    pub fn apply(&mut self, changes: SupplierChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(debt) = changes.debt {
            self.debt_local = debt.local;
            self.debt_foreign = Some(debt.foreign);
            self.updated_at = debt.recorded_at;
        }
    }
}

/// Validated create fields, before the rate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierDraft {
    pub name: String,
    pub code: String,
    pub email: String,
    pub debt_local: f64,
}

impl SupplierDraft {
    /// Fixes the foreign debt at `rate`.
    pub fn priced(self, rate: SellRate) -> Result<NewSupplier, DomainError> {
        Ok(NewSupplier {
            debt: DebtSnapshot::convert(self.debt_local, rate)?,
            name: self.name,
            code: self.code,
            email: self.email,
        })
    }
}

/// A supplier ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    pub code: String,
    pub email: String,
    pub debt: DebtSnapshot,
}

/// Validated update fields, before the rate lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub email: Option<String>,
    pub debt_local: Option<f64>,
}

/// The only fields a partial update may touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub email: Option<String>,
    pub debt: Option<DebtSnapshot>,
}

/// Case-insensitive substring criteria for search. Both criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFilter {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl SupplierFilter {
    /// Builds a filter, treating blank criteria as absent.
    pub fn new(name: Option<String>, code: Option<String>) -> Self {
        let keep = |s: Option<String>| s.filter(|s| !s.is_empty());
        Self {
            name: keep(name),
            code: keep(code),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none()
    }

    pub fn matches(&self, supplier: &Supplier) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        self.name
            .as_deref()
            .is_none_or(|n| contains(&supplier.name, n))
            && self
                .code
                .as_deref()
                .is_none_or(|c| contains(&supplier.code, c))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field validation
// ─────────────────────────────────────────────────────────────────────────────

/// Trims a required text field; blank counts as missing.
pub fn required_text(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<String, DomainError> {
    let value = value.ok_or(DomainError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::InvalidField {
            field,
            reason: format!("must be at most {} characters", max_len),
        });
    }
    Ok(trimmed.to_string())
}

/// Validates an optional text field from a partial update.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
) -> Result<Option<String>, DomainError> {
    value
        .map(|v| required_text(field, Some(v), max_len))
        .transpose()
}

pub fn valid_debt(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidField {
            field,
            reason: "must be a finite number".into(),
        });
    }
    if value < 0.0 {
        return Err(DomainError::InvalidField {
            field,
            reason: "cannot be negative".into(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Supplier {
        Supplier::from_parts(
            SupplierId::new(1),
            "Acme".into(),
            "AC1".into(),
            "a@x.com".into(),
            1000.0,
            Some(1.0),
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_supplier_id_parse() {
        assert_eq!("42".parse::<SupplierId>().unwrap(), SupplierId::new(42));
        assert!("abc".parse::<SupplierId>().is_err());
        assert_eq!(SupplierId::new(7).to_string(), "7");
    }

    #[test]
    fn test_debt_snapshot_converts() {
        let rate = SellRate::new(1000.0).unwrap();
        let debt = DebtSnapshot::convert(2500.0, rate).unwrap();
        assert_eq!(debt.local, 2500.0);
        assert!((debt.foreign - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_debt_snapshot_rejects_overflowing_conversion() {
        let rate = SellRate::new(1e-10).unwrap();
        let result = DebtSnapshot::convert(f64::MAX, rate);
        assert!(matches!(
            result,
            Err(DomainError::InvalidField {
                field: "debt_local",
                ..
            })
        ));

        let draft = SupplierDraft {
            name: "Acme".into(),
            code: "AC1".into(),
            email: "a@x.com".into(),
            debt_local: 1e300,
        };
        assert!(draft.priced(rate).is_err());
    }

    #[test]
    fn test_apply_without_debt_keeps_timestamp() {
        let mut supplier = acme();
        supplier.apply(SupplierChanges {
            name: Some("Acme Corp".into()),
            email: Some("b@x.com".into()),
            ..Default::default()
        });

        assert_eq!(supplier.name, "Acme Corp");
        assert_eq!(supplier.email, "b@x.com");
        assert_eq!(supplier.code, "AC1");
        assert_eq!(supplier.debt_foreign, Some(1.0));
        assert_eq!(supplier.updated_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_apply_debt_refreshes_timestamp() {
        let mut supplier = acme();
        let debt = DebtSnapshot::convert(500.0, SellRate::new(250.0).unwrap()).unwrap();
        supplier.apply(SupplierChanges {
            debt: Some(debt),
            ..Default::default()
        });

        assert_eq!(supplier.debt_local, 500.0);
        assert_eq!(supplier.debt_foreign, Some(2.0));
        assert_eq!(supplier.updated_at, debt.recorded_at);
        assert!(supplier.updated_at > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_draft_priced() {
        let draft = SupplierDraft {
            name: "Acme".into(),
            code: "AC1".into(),
            email: "a@x.com".into(),
            debt_local: 1000.0,
        };
        let new = draft.priced(SellRate::new(1000.0).unwrap()).unwrap();
        assert_eq!(new.debt.foreign, 1.0);
        assert_eq!(new.code, "AC1");
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", Some(" Acme ".into()), 10).unwrap(), "Acme");
        assert!(matches!(
            required_text("name", None, 10),
            Err(DomainError::MissingField("name"))
        ));
        assert!(matches!(
            required_text("name", Some("   ".into()), 10),
            Err(DomainError::MissingField("name"))
        ));
        assert!(matches!(
            required_text("code", Some("x".repeat(11)), 10),
            Err(DomainError::InvalidField { field: "code", .. })
        ));
    }

    #[test]
    fn test_valid_debt() {
        assert_eq!(valid_debt("debt_local", 0.0).unwrap(), 0.0);
        assert!(valid_debt("debt_local", -0.01).is_err());
        assert!(valid_debt("debt_local", f64::NAN).is_err());
    }

    #[test]
    fn test_filter_matches_case_insensitive() {
        let supplier = acme();
        assert!(SupplierFilter::new(Some("ac".into()), None).matches(&supplier));
        assert!(SupplierFilter::new(None, Some("c1".into())).matches(&supplier));
        assert!(SupplierFilter::new(Some("ME".into()), Some("ac".into())).matches(&supplier));
        assert!(!SupplierFilter::new(Some("acme".into()), Some("zz".into())).matches(&supplier));
    }

    #[test]
    fn test_filter_blank_criteria_are_absent() {
        let filter = SupplierFilter::new(Some(String::new()), None);
        assert!(filter.is_empty());
        assert!(filter.matches(&acme()));
    }
}
