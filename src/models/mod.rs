pub mod device;
pub mod dtos;
mod types;

pub use device::{Device, NewDevice};
pub use types::{DeviceId, Timestamp};
