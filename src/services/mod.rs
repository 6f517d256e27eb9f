pub mod device;

pub use device::DeviceService;
