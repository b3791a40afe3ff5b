//! Video mode query

use crate::emulator::Resolution;
use crate::error::{ConfigGenError, Result};

use super::run_query;

/// Source of the current display mode.
pub trait VideoModeProbe: Send + Sync {
    /// Current output resolution.
    fn current_resolution(&self) -> Result<Resolution>;

    /// Current refresh rate in Hz, when known.
    fn refresh_rate(&self) -> Option<f64>;
}

/// Asks the `batocera-resolution` helper.
#[derive(Debug, Clone)]
pub struct BatoceraResolution {
    program: String,
}

impl Default for BatoceraResolution {
    fn default() -> Self {
        Self {
            program: "batocera-resolution".to_string(),
        }
    }
}

impl VideoModeProbe for BatoceraResolution {
    fn current_resolution(&self) -> Result<Resolution> {
        let output = run_query(&self.program, &["currentResolution"]).ok_or_else(|| {
            ConfigGenError::invalid("videomode", "unable to query the current resolution")
        })?;
        output.parse()
    }

    fn refresh_rate(&self) -> Option<f64> {
        run_query(&self.program, &["refreshRate"])?.parse().ok()
    }
}

/// A fixed display mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVideoMode {
    pub resolution: Resolution,
    pub refresh_rate: Option<f64>,
}

impl VideoModeProbe for FixedVideoMode {
    fn current_resolution(&self) -> Result<Resolution> {
        Ok(self.resolution)
    }

    fn refresh_rate(&self) -> Option<f64> {
        self.refresh_rate
    }
}
