//! Trait definitions for the record store.

use async_trait::async_trait;

use crate::RegistrationRecord;
use crate::error::Result;

/// Append-only collection of registration records.
///
/// Insertion order is submission order. Implementations must not cache
/// records between calls: every read reflects the persisted state at the
/// time of the call.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a record to the end of the store.
    ///
    /// # Returns
    /// The number of records in the store after the append
    async fn append(&self, record: RegistrationRecord) -> Result<usize>;

    /// Load every record in insertion order.
    ///
    /// A store that has never been written to is empty, not an error.
    async fn load_all(&self) -> Result<Vec<RegistrationRecord>>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize> {
        Ok(self.load_all().await?.len())
    }
}
