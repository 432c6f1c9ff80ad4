use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{LoadError, load_csv};
use super::model::ListingDataset;

// ---------------------------------------------------------------------------
// Load-once dataset cache
// ---------------------------------------------------------------------------

/// Keeps every successfully loaded dataset, keyed by path.
///
/// A path is read from disk at most once per process; later requests get the
/// same `Arc`. Failed loads are not remembered, so a retry reads the file again.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<ListingDataset>>,
}

impl DatasetCache {
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ListingDataset>, LoadError> {
        if let Some(ds) = self.entries.get(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_csv(path)?);
        log::info!(
            "Loaded {} listings with columns {:?} from {}",
            ds.len(),
            ds.column_names().collect::<Vec<_>>(),
            path.display()
        );
        self.entries.insert(path.to_path_buf(), Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop the cached copy of `path` so the next request re-reads the file.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_second_load_reuses_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"price,type,manufacturer\n100,sedan,ford\n").unwrap();
        let mut cache = DatasetCache::default();

        let first = cache.get_or_load(file.path()).unwrap();
        // Rewriting the file must not change what the cache hands out.
        file.write_all(b"200,SUV,bmw\n").unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert!(cache.contains(file.path()));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_vehicles_us.csv");
        let mut cache = DatasetCache::default();

        assert!(cache.get_or_load(&path).is_err());
        assert!(!cache.contains(&path));

        std::fs::write(&path, "price,type,manufacturer\n100,sedan,ford\n").unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
        assert!(cache.contains(&path));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"price,type,manufacturer\n100,sedan,ford\n").unwrap();
        let mut cache = DatasetCache::default();

        cache.get_or_load(file.path()).unwrap();
        file.write_all(b"200,SUV,bmw\n").unwrap();
        file.flush().unwrap();
        assert!(cache.invalidate(file.path()));

        assert_eq!(cache.get_or_load(file.path()).unwrap().len(), 2);
    }
}
