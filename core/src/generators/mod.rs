//! Built-in generators
//!
//! Each module owns one emulator family and its on-disk format. Formatters
//! stay local to their generator; the only shared pieces are the settings
//! file types in [`crate::helpers::settings`].

mod bsnes;
mod build_engine;
mod cdogs;
mod devilutionx;
mod dolphin;
mod dosbox;
mod duckstation;
mod flatpak;
mod hatari;
mod hurrican;
mod libretro;
mod melonds;
mod mupen64plus;
mod ports;
mod ppsspp;
mod px68k;
mod ruffle;
mod scummvm;
mod steam;

pub use bsnes::BsnesGenerator;
pub use build_engine::{Eduke32Generator, RazeGenerator};
pub use cdogs::CdogsGenerator;
pub use devilutionx::DevilutionXGenerator;
pub use dolphin::DolphinGenerator;
pub use dosbox::DosBoxGenerator;
pub use duckstation::DuckstationGenerator;
pub use flatpak::FlatpakGenerator;
pub use hatari::HatariGenerator;
pub use hurrican::HurricanGenerator;
pub use libretro::LibretroGenerator;
pub use melonds::MelonDsGenerator;
pub use mupen64plus::Mupen64PlusGenerator;
pub use ports::PortsGenerator;
pub use ppsspp::PpssppGenerator;
pub use px68k::Px68kGenerator;
pub use ruffle::RuffleGenerator;
pub use scummvm::ScummVmGenerator;
pub use steam::SteamGenerator;

use std::path::{Path, PathBuf};

use crate::generator::{Generator, GeneratorEntry};

/// Message logged by asset-gated generators.
pub const ASSETS_MISSING: &str =
    "Game assets not installed. You can get them from the Batocera Content Downloader.";

fn boxed<G: Generator + Default + 'static>() -> Box<dyn Generator> {
    Box::new(G::default())
}

fn dolphin_wii() -> Box<dyn Generator> {
    Box::new(DolphinGenerator::wii())
}

/// Every built-in registry entry.
pub static BUILTIN: &[GeneratorEntry] = &[
    GeneratorEntry::emulator("libretro", boxed::<LibretroGenerator>),
    GeneratorEntry::full("x68000", "libretro", "px68k", boxed::<Px68kGenerator>),
    GeneratorEntry::emulator("bsnes", boxed::<BsnesGenerator>),
    GeneratorEntry::emulator("hurrican", boxed::<HurricanGenerator>),
    GeneratorEntry::emulator("cdogs", boxed::<CdogsGenerator>),
    GeneratorEntry::emulator("devilutionx", boxed::<DevilutionXGenerator>),
    GeneratorEntry::emulator("melonds", boxed::<MelonDsGenerator>),
    GeneratorEntry::emulator("mupen64plus", boxed::<Mupen64PlusGenerator>),
    GeneratorEntry::emulator("dolphin", boxed::<DolphinGenerator>),
    GeneratorEntry::system_emulator("wii", "dolphin", dolphin_wii),
    GeneratorEntry::emulator("ppsspp", boxed::<PpssppGenerator>),
    GeneratorEntry::emulator("duckstation", boxed::<DuckstationGenerator>),
    GeneratorEntry::emulator("dosbox", boxed::<DosBoxGenerator>),
    GeneratorEntry::emulator("scummvm", boxed::<ScummVmGenerator>),
    GeneratorEntry::emulator("raze", boxed::<RazeGenerator>),
    GeneratorEntry::emulator("eduke32", boxed::<Eduke32Generator>),
    GeneratorEntry::system("flatpak", boxed::<FlatpakGenerator>),
    GeneratorEntry::system("steam", boxed::<SteamGenerator>),
    GeneratorEntry::system("ports", boxed::<PortsGenerator>),
    GeneratorEntry::emulator("ruffle", boxed::<RuffleGenerator>),
    GeneratorEntry::emulator("hatari", boxed::<HatariGenerator>),
];

/// Directory a ROM lives in; a directory ROM is its own directory.
pub(crate) fn rom_directory(rom: &Path) -> PathBuf {
    if rom.is_dir() {
        rom.to_path_buf()
    } else {
        rom.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

/// `"True"`/`"False"` as several INI-based emulators spell booleans.
pub(crate) fn ini_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
