//! Device selection by name
//!
//! Finds the target device among the ones the service reports and builds a
//! readable listing of the alternatives when it is missing.

use spotify_client::Device;

use crate::error::{PlayerError, Result};

/// Resolve `name` to a device identifier
///
/// Names are matched exactly. Fails with `NoActiveDevice` when the list is
/// empty and `DeviceNotFound` when nothing matches.
pub fn find_device_id(devices: &[Device], name: &str) -> Result<String> {
    if devices.is_empty() {
        return Err(PlayerError::NoActiveDevice);
    }

    devices
        .iter()
        .filter(|device| device.name == name)
        .find_map(|device| device.id.clone())
        .ok_or_else(|| PlayerError::DeviceNotFound {
            name: name.to_string(),
            available: format_device_list(devices),
        })
}

/// One line per device: name, type and whether it is currently active
pub fn format_device_list(devices: &[Device]) -> String {
    devices
        .iter()
        .map(|device| {
            let active = if device.is_active { ", active" } else { "" };
            format!("  - {} ({}{})", device.name, device.device_type, active)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
