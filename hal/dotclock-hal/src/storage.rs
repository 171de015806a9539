//! Persistent key-value storage abstractions
//!
//! Provides the trait for small persisted values (user preferences) that
//! chip-specific ports implement over their flash, plus an in-memory
//! implementation for hosts and tests.

use heapless::{LinearMap, Vec};

/// Largest value the storage layer is expected to hold
pub const MAX_VALUE_LEN: usize = 8;

/// Default capacity of [`MemoryStorage`]
pub const DEFAULT_MEMORY_SLOTS: usize = 8;

/// Storage key
///
/// Keys are the numeric identifiers shared with the companion protocol, so
/// a preference is persisted under the same id it travels with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageKey(pub u32);

impl StorageKey {
    /// Get the raw key id
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for StorageKey {
    fn from(id: u32) -> Self {
        StorageKey(id)
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying medium failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Storage is full
    Full,
}

/// Key-value storage trait
///
/// Reads and writes are synchronous and bounded: the watchface calls them
/// from its event handlers, which must never block for long.
pub trait SettingsStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read, or [`StorageError::NotFound`] if
    /// nothing was ever written under `key`.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;

}

impl<T: SettingsStorage + ?Sized> SettingsStorage for &mut T {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(key, buffer)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, data)
    }
}

/// In-memory storage
///
/// Bounded map of `N` entries. Used by the host simulator and as the
/// reference implementation in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage<const N: usize = DEFAULT_MEMORY_SLOTS> {
    entries: LinearMap<StorageKey, Vec<u8, MAX_VALUE_LEN>, N>,
}

impl<const N: usize> MemoryStorage<N> {
    /// Create empty storage
    pub const fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> SettingsStorage for MemoryStorage<N> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let value = self.entries.get(&key).ok_or(StorageError::NotFound)?;
        let len = value.len();
        if buffer.len() < len {
            return Err(StorageError::BufferTooSmall);
        }
        buffer[..len].copy_from_slice(value);
        Ok(len)
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let value = Vec::from_slice(data).map_err(|_| StorageError::BufferTooSmall)?;
        self.entries
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.len() < 4 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[..4].copy_from_slice(&self.0.to_le_bytes());
        Ok(4)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.len() < 4 {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        let id = u32::from_le_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
        Ok((StorageKey(id), 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_not_found() {
        let mut storage = MemoryStorage::<4>::new();
        let mut buf = [0u8; 4];
        assert_eq!(
            storage.read(StorageKey(3), &mut buf),
            Err(StorageError::NotFound)
        );
        assert!(storage.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let mut storage = MemoryStorage::<4>::new();
        storage.write(StorageKey(4), &[1]).unwrap();

        let mut buf = [0u8; 4];
        let len = storage.read(StorageKey(4), &mut buf).unwrap();
        assert_eq!(&buf[..len], &[1]);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let mut storage = MemoryStorage::<4>::new();
        storage.write(StorageKey(5), &[1]).unwrap();
        storage.write(StorageKey(5), &[0]).unwrap();

        let mut buf = [0u8; 1];
        storage.read(StorageKey(5), &mut buf).unwrap();
        assert_eq!(buf[0], 0);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_full_storage_rejects_new_keys() {
        let mut storage = MemoryStorage::<2>::new();
        storage.write(StorageKey(1), &[1]).unwrap();
        storage.write(StorageKey(2), &[1]).unwrap();
        assert_eq!(storage.write(StorageKey(3), &[1]), Err(StorageError::Full));
        // Existing keys can still be updated
        assert!(storage.write(StorageKey(2), &[0]).is_ok());
    }

    #[test]
    fn test_small_read_buffer() {
        let mut storage = MemoryStorage::<2>::new();
        storage.write(StorageKey(1), &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 2];
        assert_eq!(
            storage.read(StorageKey(1), &mut buf),
            Err(StorageError::BufferTooSmall)
        );
    }

    #[test]
    fn test_oversized_value_rejected() {
        let mut storage = MemoryStorage::<2>::new();
        let data = [0u8; MAX_VALUE_LEN + 1];
        assert_eq!(
            storage.write(StorageKey(1), &data),
            Err(StorageError::BufferTooSmall)
        );
    }

    #[test]
    fn test_through_mut_reference() {
        fn write_flag<S: SettingsStorage>(mut storage: S) {
            storage.write(StorageKey(7), &[1]).unwrap();
        }

        let mut storage = MemoryStorage::<4>::new();
        write_flag(&mut storage);
        let mut buf = [0u8; 1];
        assert_eq!(storage.read(StorageKey(7), &mut buf), Ok(1));
    }

    #[cfg(feature = "sequential-storage")]
    #[test]
    fn test_sequential_storage_key_roundtrip() {
        use sequential_storage::map::Key;

        let key = StorageKey(0x0102_0304);
        let mut buf = [0u8; 8];
        let len = key.serialize_into(&mut buf).unwrap();
        assert_eq!(len, 4);
        let (parsed, used) = StorageKey::deserialize_from(&buf[..len]).unwrap();
        assert_eq!(parsed, key);
        assert_eq!(used, 4);
    }
}
