pub mod ffi;
pub mod probe;

pub use probe::AndroidMediaCodecProbe;

/// Whether this device has a hardware decoder for any known codec.
pub fn is_hardware_acceleration_supported() -> bool {
    crate::device::is_hardware_acceleration_supported(&AndroidMediaCodecProbe::default())
}
