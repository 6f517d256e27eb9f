use crate::services::DeviceService;
use crate::store::DeviceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub device_service: Arc<DeviceService>,
}

impl AppState {
    pub fn build(store: Arc<dyn DeviceStore>) -> Self {
        Self {
            device_service: Arc::new(DeviceService::new(store)),
        }
    }
}
