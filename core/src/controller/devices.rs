//! Input device information (keyboard/mouse pairing)

use std::path::{Path, PathBuf};

use super::Controller;

/// Source of input device information.
///
/// Passed to generators as a service so tests can substitute a recording
/// fake for the sysfs walk.
pub trait DeviceInfo: Send + Sync {
    /// Index of the mouse sharing a physical device with `device_path`.
    fn paired_mouse(&self, device_path: &str) -> Option<u32>;

    /// Every mouse index present, ascending.
    fn mice(&self) -> Vec<u32>;
}

/// Pointing device for a player.
///
/// The paired mouse wins. Keyboard players without a pair fall back to the
/// first mouse; other players get none.
pub fn pointing_device(devices: &dyn DeviceInfo, controller: &Controller) -> Option<u32> {
    devices
        .paired_mouse(&controller.device_path)
        .or_else(|| {
            if controller.is_keyboard() {
                devices.mice().first().copied()
            } else {
                None
            }
        })
}

/// No input devices at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDevices;

impl DeviceInfo for NoDevices {
    fn paired_mouse(&self, _device_path: &str) -> Option<u32> {
        None
    }

    fn mice(&self) -> Vec<u32> {
        Vec::new()
    }
}

/// Device information read from `<sysfs>/class/input`.
///
/// Two input nodes are paired when their `device` links resolve to input
/// devices under the same physical parent.
#[derive(Debug, Clone)]
pub struct SysfsDeviceInfo {
    class_input: PathBuf,
}

impl SysfsDeviceInfo {
    pub fn new(sysfs: &Path) -> Self {
        Self {
            class_input: sysfs.join("class").join("input"),
        }
    }

    fn physical_parent(&self, node: &str) -> Option<PathBuf> {
        let device = std::fs::canonicalize(self.class_input.join(node).join("device")).ok()?;
        device.parent().map(Path::to_path_buf)
    }

    fn mouse_nodes(&self) -> Vec<(u32, String)> {
        let Ok(entries) = std::fs::read_dir(&self.class_input) else {
            return Vec::new();
        };
        let mut mice: Vec<(u32, String)> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                let index = name.strip_prefix("mouse")?.parse().ok()?;
                Some((index, name))
            })
            .collect();
        mice.sort();
        mice
    }
}

impl DeviceInfo for SysfsDeviceInfo {
    fn paired_mouse(&self, device_path: &str) -> Option<u32> {
        let node = Path::new(device_path).file_name()?.to_str()?;
        let parent = self.physical_parent(node)?;
        let index = self
            .mouse_nodes()
            .into_iter()
            .find(|(_, name)| self.physical_parent(name).as_ref() == Some(&parent))
            .map(|(index, _)| index);
        tracing::debug!(device = device_path, mouse = ?index, "paired mouse lookup");
        index
    }

    fn mice(&self) -> Vec<u32> {
        self.mouse_nodes().into_iter().map(|(index, _)| index).collect()
    }
}
