mod memory;
mod sqlite;

pub use memory::InMemoryDeviceStore;
pub use sqlite::SqliteDeviceStore;

use crate::models::{Device, DeviceId, NewDevice};
use async_trait::async_trait;

/// Persistence for device records.
///
/// Implementations assign `id` and `created_at` on create and return records in ascending id
/// order from every listing method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn create(&self, device: NewDevice) -> anyhow::Result<Device>;

    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>>;

    async fn find_all(&self) -> anyhow::Result<Vec<Device>>;

    async fn exists_by_id(&self, id: DeviceId) -> anyhow::Result<bool>;

    /// Overwrites `name` and `brand` of an existing record, returns `None` if it is gone.
    async fn update(&self, device: &Device) -> anyhow::Result<Option<Device>>;

    /// Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: DeviceId) -> anyhow::Result<bool>;

    /// Case-insensitive substring match on `brand`, an empty query matches everything.
    async fn search_by_brand(&self, query: &str) -> anyhow::Result<Vec<Device>>;
}
