use crate::models::{Device, DeviceId, NewDevice, Timestamp};
use crate::store::DeviceStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryDeviceStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    devices: BTreeMap<DeviceId, Device>,
}

impl InMemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceStore for InMemoryDeviceStore {
    async fn create(&self, device: NewDevice) -> anyhow::Result<Device> {
        let mut inner = self.inner.write().await;
        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| anyhow::format_err!("Device id space exhausted"))?;
        let record = Device {
            id: DeviceId::from(inner.last_id),
            name: device.name,
            brand: device.brand,
            created_at: Timestamp::now(),
        };
        inner.devices.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: DeviceId) -> anyhow::Result<Option<Device>> {
        Ok(self.inner.read().await.devices.get(&id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Device>> {
        Ok(self.inner.read().await.devices.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: DeviceId) -> anyhow::Result<bool> {
        Ok(self.inner.read().await.devices.contains_key(&id))
    }

    async fn update(&self, device: &Device) -> anyhow::Result<Option<Device>> {
        let mut inner = self.inner.write().await;
        Ok(inner.devices.get_mut(&device.id).map(|it| {
            it.name.clone_from(&device.name);
            it.brand.clone_from(&device.brand);
            it.clone()
        }))
    }

    async fn delete_by_id(&self, id: DeviceId) -> anyhow::Result<bool> {
        Ok(self.inner.write().await.devices.remove(&id).is_some())
    }

    async fn search_by_brand(&self, query: &str) -> anyhow::Result<Vec<Device>> {
        let query = query.to_lowercase();
        Ok(self
            .inner
            .read()
            .await
            .devices
            .values()
            .filter(|it| it.brand.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}
