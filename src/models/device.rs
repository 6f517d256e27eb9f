use crate::models::{DeviceId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub created_at: Timestamp,
}

/// A device that has not been persisted yet; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub brand: String,
}
