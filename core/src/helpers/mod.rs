//! Helpers shared by several generators
//!
//! Probes that touch the running system (video mode, Vulkan, downloads,
//! input devices) are traits so generators receive them as services.

pub mod assets;
pub mod build_args;
pub mod controller_db;
pub mod download;
pub mod settings;
pub mod squashfs;
pub mod video_mode;
pub mod vulkan;

use std::process::Command;

/// Run a query program and return its trimmed stdout on success.
pub(crate) fn run_query(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(output) => {
            tracing::debug!(program, ?args, status = %output.status, "query failed");
            None
        }
        Err(e) => {
            tracing::debug!(program, ?args, error = %e, "query not runnable");
            None
        }
    }
}
