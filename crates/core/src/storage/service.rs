//! Document store implementation.

use dues_shared::config::ArchiveProvider;
use opendal::{Operator, services};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::StorageError;

const REPORTS_PREFIX: &str = "reports/";
const TEMP_PREFIX: &str = ".tmp/";

/// A document written to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Final storage key.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
}

/// Archive for finished reports.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    operator: Operator,
    provider: &'static str,
}

impl DocumentStore {
    /// Create a store from the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_provider(provider: &ArchiveProvider) -> Result<Self, StorageError> {
        let operator = create_operator(provider)?;
        Ok(Self {
            operator,
            provider: provider.name(),
        })
    }

    /// Get the storage provider name.
    #[must_use]
    pub const fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Storage key a document name resolves to.
    ///
    /// # Errors
    ///
    /// Returns an error if the name sanitizes to nothing.
    pub fn key_for(name: &str) -> Result<String, StorageError> {
        let sanitized = sanitize_filename(name);
        if sanitized.trim_matches(['.', '_']).is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(format!("{REPORTS_PREFIX}{sanitized}"))
    }

    /// Archive a document under `name`.
    ///
    /// The bytes land under a temporary key first and are renamed into place
    /// when the backend can rename; otherwise one direct write is issued.
    /// A failed store never leaves a partial document at the final key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or rename fails.
    pub async fn store(&self, name: &str, bytes: Vec<u8>) -> Result<StoredDocument, StorageError> {
        let key = Self::key_for(name)?;
        let size = bytes.len() as u64;

        if self.operator.info().full_capability().rename {
            let temp = format!("{TEMP_PREFIX}{}-{}", Uuid::new_v4(), sanitize_filename(name));
            self.operator.write(&temp, bytes).await?;

            if let Err(err) = self.operator.rename(&temp, &key).await {
                error!(key = %key, error = %err, "failed to move archived report into place");
                if let Err(cleanup) = self.operator.delete(&temp).await {
                    debug!(key = %temp, error = %cleanup, "temporary document left behind");
                }
                return Err(err.into());
            }
        } else {
            self.operator.write(&key, bytes).await?;
        }

        info!(key = %key, size, provider = self.provider, "archived report");
        Ok(StoredDocument { key, size })
    }
}

/// Create OpenDAL operator from provider config.
fn create_operator(provider: &ArchiveProvider) -> Result<Operator, StorageError> {
    match provider {
        ArchiveProvider::S3 {
            endpoint,
            bucket,
            access_key_id,
            secret_access_key,
            region,
        } => {
            let builder = services::S3::default()
                .endpoint(endpoint)
                .bucket(bucket)
                .access_key_id(access_key_id)
                .secret_access_key(secret_access_key)
                .region(region);

            Ok(Operator::new(builder)
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish())
        }
        ArchiveProvider::LocalFs { root } => {
            let root = root
                .to_str()
                .ok_or_else(|| StorageError::configuration("invalid path"))?;
            let builder = services::Fs::default().root(root);

            Ok(Operator::new(builder)
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish())
        }
    }
}

/// Sanitize a document name for use as a storage key.
///
/// Only ASCII alphanumerics, dots, hyphens and underscores survive; anything
/// else, path separators included, becomes `_`.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn local_store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::from_provider(&ArchiveProvider::local_fs(dir.path())).unwrap();
        (dir, store)
    }

    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
            prop_assert_eq!(sanitized.chars().count(), filename.chars().count());
        }
    }

    #[test]
    fn test_sanitize_keeps_report_names() {
        assert_eq!(
            sanitize_filename("rapport_mensuel_2024-01-01_2024-01-31.pdf"),
            "rapport_mensuel_2024-01-01_2024-01-31.pdf"
        );
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
    }

    #[test]
    fn test_key_for_rejects_empty_names() {
        assert!(matches!(
            DocumentStore::key_for(""),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            DocumentStore::key_for("/.."),
            Err(StorageError::InvalidName(_))
        ));
        assert_eq!(
            DocumentStore::key_for("liste_membres_1.pdf").unwrap(),
            "reports/liste_membres_1.pdf"
        );
    }

    #[tokio::test]
    async fn test_store_writes_final_key() {
        let (dir, store) = local_store();
        assert_eq!(store.provider_name(), "local");

        let stored = store
            .store("liste_cotisations_1700000000.pdf", b"%PDF-1.5 body".to_vec())
            .await
            .unwrap();
        assert_eq!(stored.key, "reports/liste_cotisations_1700000000.pdf");
        assert_eq!(stored.size, 13);

        let path = dir.path().join("reports/liste_cotisations_1700000000.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.5 body");
    }

    #[tokio::test]
    async fn test_store_leaves_no_temporary_documents() {
        let (dir, store) = local_store();
        store.store("a.pdf", vec![1, 2, 3]).await.unwrap();

        let temp = dir.path().join(".tmp");
        let leftovers = std::fs::read_dir(&temp)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_store_overwrites_existing_document() {
        let (dir, store) = local_store();
        store.store("a.pdf", b"first".to_vec()).await.unwrap();
        store.store("a.pdf", b"second".to_vec()).await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("reports/a.pdf")).unwrap(), b"second");
    }
}
