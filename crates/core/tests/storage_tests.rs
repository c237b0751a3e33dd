// ═══════════════════════════════════════════════════════════════════
// Storage Tests: MemoryStorage, FileStorage
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use farm_advisor_core::models::navigation::Language;
use farm_advisor_core::services::navigation_service::{NavPreferenceStore, NAV_PREFERENCES_KEY};
use farm_advisor_core::storage::file::FileStorage;
use farm_advisor_core::storage::memory::MemoryStorage;
use farm_advisor_core::storage::port::PreferenceStorage;

// ═══════════════════════════════════════════════════════════════════
// MemoryStorage
// ═══════════════════════════════════════════════════════════════════

mod memory_storage {
    use super::*;

    #[test]
    fn read_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("nothing").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn write_then_read() {
        let storage = MemoryStorage::new();
        storage.write("k", "v1").unwrap();
        storage.write("k", "v2").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn usable_as_trait_object() {
        let storage: Arc<dyn PreferenceStorage> = Arc::new(MemoryStorage::new());
        storage.write("a", "1").unwrap();
        assert_eq!(storage.read("a").unwrap().as_deref(), Some("1"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStorage
// ═══════════════════════════════════════════════════════════════════

mod file_storage {
    use super::*;

    #[test]
    fn key_maps_to_safe_file_name() {
        let storage = FileStorage::new("/tmp/prefs");
        assert_eq!(
            storage.path_for(NAV_PREFERENCES_KEY),
            std::path::PathBuf::from("/tmp/prefs/farm-advisor_nav-preferences.json")
        );
        assert_eq!(
            storage.path_for("../escape/me"),
            std::path::PathBuf::from("/tmp/prefs/.._escape_me.json")
        );
    }

    #[test]
    fn read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read("nothing").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested);
        storage.write("k", "{\"x\":1}").unwrap();
        assert!(nested.join("k.json").exists());
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("{\"x\":1}"));
        assert_eq!(storage.dir(), nested.as_path());
    }

    #[test]
    fn remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove("never-written").unwrap();
        storage.write("k", "v").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.read("k").unwrap(), None);
    }

    #[test]
    fn nav_preferences_survive_a_new_storage_handle() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = NavPreferenceStore::load(Arc::new(FileStorage::new(dir.path())));
        store.set_language(Language::Hi);
        store.toggle("market-prices");
        drop(store);

        let reloaded = NavPreferenceStore::load(Arc::new(FileStorage::new(dir.path())));
        assert_eq!(reloaded.language(), Language::Hi);
        assert!(!reloaded.is_visible("market-prices"));
    }

    #[test]
    fn unwritable_location_does_not_break_the_store() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the storage directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let storage = FileStorage::new(&blocker);
        assert!(storage.write("k", "v").is_err());

        let mut store = NavPreferenceStore::load(Arc::new(storage));
        assert!(store.toggle("inventory"));
        assert!(!store.is_visible("inventory"));
    }
}
