use crate::models::{Device, DeviceId, NewDevice, Timestamp};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/devices` and `PUT /api/devices/{id}`.
///
/// `id` and `createdAt` may be present in the payload but are never read.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceBodyDto {
    pub name: String,
    pub brand: String,
}

impl From<DeviceBodyDto> for NewDevice {
    fn from(value: DeviceBodyDto) -> Self {
        Self {
            name: value.name,
            brand: value.brand,
        }
    }
}

/// Body of `PATCH /api/devices/{id}`.
///
/// Unknown keys are ignored and `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicePatchBodyDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

impl DevicePatchBodyDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.brand.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryDto {
    pub brand: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponseDto {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub created_at: Timestamp,
}

impl From<Device> for DeviceResponseDto {
    fn from(value: Device) -> Self {
        Self {
            id: value.id,
            name: value.name,
            brand: value.brand,
            created_at: value.created_at,
        }
    }
}
