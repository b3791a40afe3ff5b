//! Collaborators handed to every generator
//!
//! Anything that touches the running system besides plain file writes goes
//! through [`Services`], so tests can swap each query for a fixed answer.

use configgen_shared::Paths;

use crate::controller::{DeviceInfo, SysfsDeviceInfo};
use crate::helpers::download::{Downloader, HttpDownloader};
use crate::helpers::video_mode::{BatoceraResolution, VideoModeProbe};
use crate::helpers::vulkan::{BatoceraVulkan, VulkanProbe};

/// Per-launch service bundle.
pub struct Services {
    pub paths: Paths,
    pub devices: Box<dyn DeviceInfo>,
    pub video: Box<dyn VideoModeProbe>,
    pub vulkan: Box<dyn VulkanProbe>,
    pub downloader: Box<dyn Downloader>,
}

impl Services {
    /// Production services for `paths`.
    pub fn system(paths: Paths) -> Self {
        Self {
            devices: Box::new(SysfsDeviceInfo::new(&paths.sysfs)),
            video: Box::new(BatoceraResolution::default()),
            vulkan: Box::new(BatoceraVulkan::default()),
            downloader: Box::new(HttpDownloader::default()),
            paths,
        }
    }

    pub fn with_devices(mut self, devices: impl DeviceInfo + 'static) -> Self {
        self.devices = Box::new(devices);
        self
    }

    pub fn with_video(mut self, video: impl VideoModeProbe + 'static) -> Self {
        self.video = Box::new(video);
        self
    }

    pub fn with_vulkan(mut self, vulkan: impl VulkanProbe + 'static) -> Self {
        self.vulkan = Box::new(vulkan);
        self
    }

    pub fn with_downloader(mut self, downloader: impl Downloader + 'static) -> Self {
        self.downloader = Box::new(downloader);
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}
