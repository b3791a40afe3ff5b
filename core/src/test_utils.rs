//! Shared test utilities for integration and unit tests

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use configgen_shared::Paths;

use crate::config::SystemConfig;
use crate::controller::{Controller, DeviceInfo, Input, InputKind, NoDevices, Players};
use crate::emulator::{Emulator, EmulatorRequest, Gun, Resolution};
use crate::error::Result;
use crate::generator::Generator;
use crate::helpers::download::{Downloader, OfflineDownloader};
use crate::helpers::video_mode::FixedVideoMode;
use crate::helpers::vulkan::StaticVulkan;
use crate::services::Services;

// ============================================================================
// Controllers
// ============================================================================

fn input(kind: InputKind, id: i32, value: i32) -> Input {
    Input {
        kind,
        id,
        value,
        code: None,
    }
}

/// An Xbox 360 pad with a full mapping.
pub fn xbox_pad(player_index: u32, device_path: &str) -> Controller {
    use InputKind::*;
    let inputs = [
        ("a", input(Button, 0, 1)),
        ("b", input(Button, 1, 1)),
        ("x", input(Button, 2, 1)),
        ("y", input(Button, 3, 1)),
        ("l1", input(Button, 4, 1)),
        ("r1", input(Button, 5, 1)),
        ("select", input(Button, 6, 1)),
        ("start", input(Button, 7, 1)),
        ("hotkey", input(Button, 8, 1)),
        ("l3", input(Button, 9, 1)),
        ("r3", input(Button, 10, 1)),
        ("up", input(Hat, 0, 1)),
        ("right", input(Hat, 0, 2)),
        ("down", input(Hat, 0, 4)),
        ("left", input(Hat, 0, 8)),
        ("joystick1left", input(Axis, 0, -1)),
        ("joystick1up", input(Axis, 1, -1)),
        ("l2", input(Axis, 2, 1)),
        ("joystick2left", input(Axis, 3, -1)),
        ("joystick2up", input(Axis, 4, -1)),
        ("r2", input(Axis, 5, 1)),
    ];
    Controller {
        name: "Xbox 360 Controller".to_string(),
        guid: "030000005e0400008e02000014010000".to_string(),
        device_path: device_path.to_string(),
        index: player_index - 1,
        player_index,
        inputs: inputs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        buttons: 11,
        axes: 6,
        hats: 1,
    }
}

/// A keyboard mapped as a pad.
pub fn keyboard(player_index: u32, device_path: &str) -> Controller {
    use InputKind::Key;
    let inputs = [
        ("a", input(Key, 120, 1)),
        ("b", input(Key, 122, 1)),
        ("start", input(Key, 13, 1)),
        ("select", input(Key, 32, 1)),
        ("up", input(Key, 1073741906, 1)),
        ("down", input(Key, 1073741905, 1)),
        ("left", input(Key, 1073741904, 1)),
        ("right", input(Key, 1073741903, 1)),
    ];
    Controller {
        name: "AT Translated Set 2 keyboard".to_string(),
        guid: String::new(),
        device_path: device_path.to_string(),
        index: player_index - 1,
        player_index,
        inputs: inputs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        buttons: 0,
        axes: 0,
        hats: 0,
    }
}

/// `n` Xbox pads on consecutive event nodes.
pub fn pads(n: u32) -> Players {
    Players::new(
        (1..=n)
            .map(|i| xbox_pad(i, &format!("/dev/input/event{}", i + 2)))
            .collect(),
    )
    .unwrap()
}

pub fn sinden_gun() -> Gun {
    Gun {
        name: "Sinden Lightgun".to_string(),
        device_path: "/dev/input/event20".to_string(),
        mouse_index: 0,
        buttons: vec!["trigger".into(), "start".into(), "select".into()],
        need_cross: false,
        need_borders: true,
    }
}

// ============================================================================
// Fake services
// ============================================================================

/// Device information with fixed answers that records every lookup.
#[derive(Debug, Default)]
pub struct FakeDevices {
    pairs: BTreeMap<String, Option<u32>>,
    mice: Vec<u32>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeDevices {
    pub fn new(pairs: &[(&str, Option<u32>)], mice: &[u32]) -> Self {
        Self {
            pairs: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            mice: mice.to_vec(),
            calls: Arc::default(),
        }
    }

    /// Handle on the recorded lookups, usable after the fake was moved
    /// into [`Services`].
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeviceInfo for FakeDevices {
    fn paired_mouse(&self, device_path: &str) -> Option<u32> {
        self.calls.lock().unwrap().push(device_path.to_string());
        self.pairs.get(device_path).copied().flatten()
    }

    fn mice(&self) -> Vec<u32> {
        self.mice.clone()
    }
}

/// Downloader that writes fixed bytes and records requested URLs.
#[derive(Debug, Default)]
pub struct FakeDownloader {
    pub body: Vec<u8>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl FakeDownloader {
    pub fn new(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            urls: Arc::default(),
        }
    }

    pub fn url_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.urls)
    }
}

impl Downloader for FakeDownloader {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        self.urls.lock().unwrap().push(url.to_string());
        configgen_shared::fs::write_atomic(dest, &self.body)?;
        Ok(())
    }
}

// ============================================================================
// Test environment
// ============================================================================

/// A throwaway filesystem root with the production layout below it.
pub struct TestEnv {
    pub dir: tempfile::TempDir,
    pub paths: Paths,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::rooted(dir.path());
        Self { dir, paths }
    }

    /// Services with no devices, a 1920x1080 display, no Vulkan and no
    /// network.
    pub fn services(&self) -> Services {
        Services {
            paths: self.paths.clone(),
            devices: Box::new(NoDevices),
            video: Box::new(FixedVideoMode {
                resolution: Resolution::new(1920, 1080),
                refresh_rate: Some(60.0),
            }),
            vulkan: Box::new(StaticVulkan::default()),
            downloader: Box::new(OfflineDownloader),
        }
    }

    /// Create a file (and its parents) below the root.
    pub fn write(&self, path: &Path, contents: &str) -> PathBuf {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
        path.to_path_buf()
    }

    /// A ROM file under `ROMS/<system>/`.
    pub fn rom(&self, system: &str, name: &str) -> PathBuf {
        self.write(&self.paths.rom_dir(system).join(name), "rom")
    }

    /// Install a fake libretro core.
    pub fn install_core(&self, core: &str) {
        self.write(
            &self.paths.libretro_cores.join(format!("{}_libretro.so", core)),
            "",
        );
    }

    /// Descriptor whose config is the generator's defaults plus `options`.
    pub fn descriptor(
        &self,
        generator: &dyn Generator,
        system: &str,
        emulator: &str,
        core: &str,
        rom: &Path,
        options: &[(&str, &str)],
    ) -> Emulator {
        let mut config: SystemConfig = generator.default_options().iter().copied().collect();
        config.merge_from(&options.iter().copied().collect());
        let request = EmulatorRequest {
            system: system.to_string(),
            emulator: emulator.to_string(),
            core: core.to_string(),
            rom: rom.to_path_buf(),
            config,
            resolution: Resolution::new(1920, 1080),
            ..Default::default()
        };
        Emulator::from_request(request, &self.paths).unwrap()
    }

    /// Every file below the root with its contents.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        walkdir::WalkDir::new(self.dir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let contents = std::fs::read(e.path()).unwrap();
                (e.path().to_path_buf(), contents)
            })
            .collect()
    }

    /// Read a file as text.
    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// Records `(level, message)` for every event emitted while
/// [`LogCapture::run`] is active.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

impl LogCapture {
    /// Run `f` with this capture as the thread's subscriber.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of ERROR events.
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .map(|(_, message)| message)
            .collect()
    }
}
