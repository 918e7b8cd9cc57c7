//! CSV mirror adapter.
//!
//! Writes the whole supplier table to a flat CSV file. Every export replaces
//! the file atomically: rows go to a temporary file in the same directory,
//! which is then renamed over the target.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::Serialize;
use tempfile::NamedTempFile;

use suppliers_types::{MirrorError, MirrorWriter, Supplier};

/// Column header, written even when the table is empty.
pub const MIRROR_HEADER: [&str; 7] = [
    "id",
    "name",
    "code",
    "email",
    "debt_local",
    "debt_foreign",
    "updated_at",
];

/// One CSV record. Field order must match [`MIRROR_HEADER`].
#[derive(Serialize)]
struct MirrorRow<'a> {
    id: i64,
    name: &'a str,
    code: &'a str,
    email: &'a str,
    debt_local: f64,
    debt_foreign: Option<f64>,
    updated_at: String,
}

impl<'a> From<&'a Supplier> for MirrorRow<'a> {
    fn from(s: &'a Supplier) -> Self {
        Self {
            id: s.id.get(),
            name: &s.name,
            code: &s.code,
            email: &s.email,
            debt_local: s.debt_local,
            debt_foreign: s.debt_foreign,
            updated_at: s.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// File-backed mirror writer.
#[derive(Debug, Clone)]
pub struct CsvMirror {
    path: PathBuf,
}

impl CsvMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MirrorWriter for CsvMirror {
    async fn write_snapshot(&self, suppliers: &[Supplier]) -> Result<(), MirrorError> {
        let path = self.path.clone();
        let suppliers = suppliers.to_vec();
        let rows = suppliers.len();

        tokio::task::spawn_blocking(move || write_csv_atomically(&path, &suppliers))
            .await
            .map_err(|e| MirrorError::Io(std::io::Error::other(e)))??;

        tracing::debug!(path = %self.path.display(), rows, "Mirror exported");
        Ok(())
    }
}

/// Encodes `suppliers` into a temp file next to `path` and renames it over
/// `path`. On failure the previous file is left untouched.
fn write_csv_atomically(path: &Path, suppliers: &[Supplier]) -> Result<(), MirrorError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer
            .write_record(MIRROR_HEADER)
            .map_err(|e| MirrorError::Encode(e.to_string()))?;
        for supplier in suppliers {
            writer
                .serialize(MirrorRow::from(supplier))
                .map_err(|e| MirrorError::Encode(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| MirrorError::Encode(e.to_string()))?;
    }
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;

    // NamedTempFile is created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| MirrorError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use suppliers_types::SupplierId;

    use super::*;

    fn supplier(id: i64, name: &str, code: &str, debt_foreign: Option<f64>) -> Supplier {
        Supplier::from_parts(
            SupplierId::new(id),
            name.into(),
            code.into(),
            format!("{}@x.com", code.to_lowercase()),
            1000.0,
            debt_foreign,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_empty_table_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = CsvMirror::new(dir.path().join("out.csv"));

        mirror.write_snapshot(&[]).await.unwrap();

        let content = std::fs::read_to_string(mirror.path()).unwrap();
        assert_eq!(
            content,
            "id,name,code,email,debt_local,debt_foreign,updated_at\n"
        );
    }

    #[tokio::test]
    async fn test_rows_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = CsvMirror::new(dir.path().join("out.csv"));

        mirror
            .write_snapshot(&[
                supplier(1, "Acme", "AC1", Some(1.0)),
                supplier(2, "Beta, S.A.", "BT2", None),
            ])
            .await
            .unwrap();

        let content = std::fs::read_to_string(mirror.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,Acme,AC1,ac1@x.com,1000.0,1.0,2024-05-01T12:00:00Z"
        );
        // Embedded comma is quoted, missing foreign debt is an empty cell
        assert_eq!(
            lines[2],
            "2,\"Beta, S.A.\",BT2,bt2@x.com,1000.0,,2024-05-01T12:00:00Z"
        );
    }

    #[tokio::test]
    async fn test_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = CsvMirror::new(dir.path().join("out.csv"));

        mirror
            .write_snapshot(&[
                supplier(1, "Acme", "AC1", Some(1.0)),
                supplier(2, "Beta", "BT2", Some(2.0)),
            ])
            .await
            .unwrap();
        mirror
            .write_snapshot(&[supplier(2, "Beta", "BT2", Some(2.0))])
            .await
            .unwrap();

        let content = std::fs::read_to_string(mirror.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().nth(1).unwrap().starts_with("2,Beta,"));

        // No temp files left behind
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = CsvMirror::new(dir.path().join("nested/exports/out.csv"));

        mirror.write_snapshot(&[]).await.unwrap();

        assert!(mirror.path().exists());
    }

    #[tokio::test]
    async fn test_unwritable_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        // The target is an existing directory, so the rename cannot replace it
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();
        let mirror = CsvMirror::new(&target);

        let result = mirror.write_snapshot(&[]).await;

        assert!(matches!(result, Err(MirrorError::Io(_))));
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let ts: DateTime<Utc> = "2024-05-01T12:00:00.123456Z".parse().unwrap();
        let mut s = supplier(1, "Acme", "AC1", Some(1.0));
        s.updated_at = ts;
        assert_eq!(MirrorRow::from(&s).updated_at, "2024-05-01T12:00:00.123456Z");
    }
}
