use crate::common::{ApiError, ApiResult};
use crate::models::dtos::device::{DeviceBodyDto, DevicePatchBodyDto};
use crate::models::{Device, DeviceId};
use crate::store::DeviceStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates device operations over a [`DeviceStore`].
///
/// Holds no state of its own; concurrent writes to the same device are last-write-wins as
/// decided by the store.
pub struct DeviceService {
    store: Arc<dyn DeviceStore>,
}

impl DeviceService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    /// Persists a new device. Blank names and brands are accepted as-is.
    pub async fn create(&self, body: DeviceBodyDto) -> ApiResult<Device> {
        let device = self.store.create(body.into()).await?;
        info!(device_id = %device.id, "Device created");
        Ok(device)
    }

    /// A missing device is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: DeviceId) -> ApiResult<Option<Device>> {
        debug!(device_id = %id, "Getting device");
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn list(&self) -> ApiResult<Vec<Device>> {
        let devices = self.store.find_all().await?;
        debug!(count = devices.len(), "Listed devices");
        Ok(devices)
    }

    /// Replaces both `name` and `brand`, keeping `id` and `created_at`.
    pub async fn update(&self, id: DeviceId, body: DeviceBodyDto) -> ApiResult<Device> {
        let mut device = self.find_existing(id).await?;
        device.name = body.name;
        device.brand = body.brand;
        let device = self.save(device).await?;
        info!(device_id = %id, "Device updated");
        Ok(device)
    }

    /// Replaces only the fields present in `patch`.
    pub async fn partial_update(
        &self,
        id: DeviceId,
        patch: DevicePatchBodyDto,
    ) -> ApiResult<Device> {
        let mut device = self.find_existing(id).await?;
        if patch.is_empty() {
            debug!(device_id = %id, "Empty patch, device left unchanged");
        }
        if let Some(name) = patch.name {
            device.name = name;
        }
        if let Some(brand) = patch.brand {
            device.brand = brand;
        }
        let device = self.save(device).await?;
        info!(device_id = %id, "Device patched");
        Ok(device)
    }

    pub async fn delete(&self, id: DeviceId) -> ApiResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(ApiError::DeviceNotFound(id));
        }
        self.store.delete_by_id(id).await?;
        info!(device_id = %id, "Device deleted");
        Ok(())
    }

    /// Case-insensitive substring match on `brand`; an empty query returns every device.
    pub async fn search_by_brand(&self, query: &str) -> ApiResult<Vec<Device>> {
        let devices = self.store.search_by_brand(query).await?;
        debug!(query, count = devices.len(), "Searched devices by brand");
        Ok(devices)
    }

    async fn find_existing(&self, id: DeviceId) -> ApiResult<Device> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ApiError::DeviceNotFound(id))
    }

    async fn save(&self, device: Device) -> ApiResult<Device> {
        let id = device.id;
        // the row may be deleted between the lookup and this write
        self.store
            .update(&device)
            .await?
            .ok_or(ApiError::DeviceNotFound(id))
    }
}
