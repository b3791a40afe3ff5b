//! Vulkan capability query

use super::run_query;

/// A discrete GPU reported by the Vulkan loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gpu {
    pub index: u32,
    pub name: String,
}

/// Source of Vulkan capability information.
pub trait VulkanProbe: Send + Sync {
    fn has_vulkan(&self) -> bool;

    /// The discrete GPU to prefer, when there is one.
    fn discrete_gpu(&self) -> Option<Gpu>;
}

/// Asks the `batocera-vulkan` helper.
#[derive(Debug, Clone)]
pub struct BatoceraVulkan {
    program: String,
}

impl Default for BatoceraVulkan {
    fn default() -> Self {
        Self {
            program: "batocera-vulkan".to_string(),
        }
    }
}

impl BatoceraVulkan {
    fn ask(&self, what: &str) -> Option<String> {
        run_query(&self.program, &[what])
    }
}

impl VulkanProbe for BatoceraVulkan {
    fn has_vulkan(&self) -> bool {
        self.ask("hasVulkan").as_deref() == Some("true")
    }

    fn discrete_gpu(&self) -> Option<Gpu> {
        if self.ask("hasDiscrete").as_deref() != Some("true") {
            return None;
        }
        let index = self.ask("discreteIndex")?.parse().ok()?;
        let name = self.ask("discreteName").unwrap_or_default();
        tracing::debug!(index, name = %name, "discrete GPU found");
        Some(Gpu { index, name })
    }
}

/// A fixed answer, for systems without the helper and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticVulkan {
    pub available: bool,
    pub discrete: Option<Gpu>,
}

impl VulkanProbe for StaticVulkan {
    fn has_vulkan(&self) -> bool {
        self.available
    }

    fn discrete_gpu(&self) -> Option<Gpu> {
        self.discrete.clone()
    }
}
