//! # Catalog
//!
//! Lists the store straight from the directory; there is no index to drift.

use std::fs;
use std::io::ErrorKind;

use super::errors::{StorageError, StorageResult};
use super::file::{created_at, StoredFile, PDF_SUFFIX};
use super::store::Store;

/// Read-only view of the stored files
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Store,
}

impl Catalog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List stored PDFs, newest first.
    ///
    /// A store directory that does not exist yet yields an empty list.
    pub fn list(&self) -> StorageResult<Vec<StoredFile>> {
        let entries = match fs::read_dir(self.store.root()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unavailable(e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(unavailable)?;

            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(PDF_SUFFIX) {
                continue;
            }

            // Does not follow symlinks: only regular files are stored files.
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(unavailable(e)),
            };
            if !metadata.is_file() {
                continue;
            }

            files.push(StoredFile {
                stored_name: name,
                original_name: None,
                size_bytes: metadata.len(),
                created_at: created_at(&metadata).map_err(unavailable)?,
            });
        }

        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }
}

fn unavailable(e: std::io::Error) -> StorageError {
    StorageError::CatalogUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_catalog() -> (Catalog, Store, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join("uploads"));
        (Catalog::new(store.clone()), store, temp)
    }

    #[test]
    fn test_missing_store_is_empty() {
        let (catalog, store, _temp) = create_test_catalog();

        let files = catalog.list().unwrap();
        assert!(files.is_empty());
        // Listing must not create the directory
        assert!(!store.root().exists());
    }

    #[test]
    fn test_filters_by_suffix() {
        let (catalog, store, _temp) = create_test_catalog();
        store.ensure_ready().unwrap();
        fs::write(store.root().join("1_a.pdf"), b"pdf").unwrap();
        fs::write(store.root().join("notes.txt"), b"txt").unwrap();
        fs::write(store.root().join("1_b.PDF"), b"upper").unwrap();

        let files = catalog.list().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.stored_name.as_str()).collect();
        assert_eq!(names, vec!["1_a.pdf"]);
        assert_eq!(files[0].size_bytes, 3);
        assert!(files[0].original_name.is_none());
    }

    #[test]
    fn test_skips_directories() {
        let (catalog, store, _temp) = create_test_catalog();
        store.ensure_ready().unwrap();
        fs::create_dir(store.root().join("nested.pdf")).unwrap();
        fs::write(store.staging_dir().join("half.pdf"), b"partial").unwrap();

        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_newest_first() {
        let (catalog, store, _temp) = create_test_catalog();
        store.ensure_ready().unwrap();

        fs::write(store.root().join("1_old.pdf"), b"old").unwrap();
        thread::sleep(Duration::from_millis(20));
        fs::write(store.root().join("2_new.pdf"), b"new").unwrap();

        let files = catalog.list().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].stored_name, "2_new.pdf");
        assert!(files[0].created_at >= files[1].created_at);
    }

    #[test]
    fn test_list_is_repeatable() {
        let (catalog, store, _temp) = create_test_catalog();
        store.ensure_ready().unwrap();
        fs::write(store.root().join("1_a.pdf"), b"a").unwrap();
        thread::sleep(Duration::from_millis(20));
        fs::write(store.root().join("2_b.pdf"), b"b").unwrap();

        assert_eq!(catalog.list().unwrap(), catalog.list().unwrap());
    }

    #[test]
    fn test_store_path_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("uploads");
        fs::write(&blocker, b"not a directory").unwrap();
        let catalog = Catalog::new(Store::new(&blocker));

        let result = catalog.list();
        assert!(matches!(result, Err(StorageError::CatalogUnavailable(_))));
    }
}
