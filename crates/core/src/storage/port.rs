use crate::errors::CoreError;

/// Durable key/value storage used for user preferences.
///
/// Values are opaque strings (JSON blobs in practice). A browser embedding backs
/// this with localStorage; native builds use `FileStorage`; tests use
/// `MemoryStorage` or a deliberately failing double.
pub trait PreferenceStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Overwrite the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}
