//! Per-core options written to `retroarch-core-options.cfg`
//!
//! Each core reads only knobs under its own prefix. A row maps a knob to a
//! core option with the value used when the knob is unset.

use crate::emulator::Emulator;
use crate::error::Result;

/// `(core option, knob, default)`
type OptionRow = (&'static str, &'static str, &'static str);

const FCEUMM: &[OptionRow] = &[
    ("fceumm_region", "fceumm_region", "Auto"),
    ("fceumm_aspect", "fceumm_aspect", "8:7 PAR"),
    ("fceumm_overscan_h", "fceumm_overscan_h", "disabled"),
    ("fceumm_overscan_v", "fceumm_overscan_v", "enabled"),
    ("fceumm_palette", "fceumm_palette", "default"),
];

const BEETLE_SATURN: &[OptionRow] = &[
    ("beetle_saturn_region", "beetle-saturn_region", "Auto Detect"),
    ("beetle_saturn_cart", "beetle-saturn_cart", "Auto Detect"),
    ("beetle_saturn_autortc", "beetle-saturn_autortc", "enabled"),
    ("beetle_saturn_cdimagecache", "beetle-saturn_cdimagecache", "disabled"),
    ("beetle_saturn_virtuagun_crosshair", "beetle-saturn_crosshair", "Cross"),
];

const SNES9X: &[OptionRow] = &[
    ("snes9x_region", "snes9x_region", "auto"),
    ("snes9x_overscan", "snes9x_overscan", "auto"),
    ("snes9x_aspect", "snes9x_aspect", "4:3"),
    ("snes9x_overclock_superfx", "snes9x_overclock_superfx", "100%"),
];

const BSNES: &[OptionRow] = &[
    ("bsnes_aspect_ratio", "bsnes_aspect_ratio", "Auto"),
    ("bsnes_ppu_show_overscan", "bsnes_ppu_show_overscan", "OFF"),
    ("bsnes_blur_emulation", "bsnes_blur_emulation", "OFF"),
];

const GENESIS_PLUS_GX: &[OptionRow] = &[
    ("genesis_plus_gx_bram", "gpgx_bram", "per game"),
    ("genesis_plus_gx_region_detect", "gpgx_region", "auto"),
    ("genesis_plus_gx_blargg_ntsc_filter", "gpgx_ntsc_filter", "disabled"),
    ("genesis_plus_gx_render", "gpgx_render", "single field"),
];

const MGBA: &[OptionRow] = &[
    ("mgba_skip_bios", "mgba_skip_bios", "ON"),
    ("mgba_solar_sensor_level", "mgba_solar_sensor_level", "0"),
    ("mgba_sgb_borders", "mgba_sgb_borders", "ON"),
];

const PCSX_REARMED: &[OptionRow] = &[
    ("pcsx_rearmed_show_bios_bootlogo", "pcsx_rearmed_bios_logo", "disabled"),
    ("pcsx_rearmed_multitap", "pcsx_rearmed_multitap", "disabled"),
    ("pcsx_rearmed_drc", "pcsx_rearmed_drc", "enabled"),
];

const PUAE: &[OptionRow] = &[
    ("puae_model", "puae_model", "auto"),
    ("puae_video_standard", "puae_video_standard", "PAL auto"),
    ("puae_floppy_speed", "puae_floppy_speed", "100"),
    ("puae_kickstart", "puae_kickstart", "auto"),
];

const BLUEMSX: &[OptionRow] = &[
    ("bluemsx_msxtype", "bluemsx_msxtype", "Auto"),
    ("bluemsx_overscan", "bluemsx_overscan", "enabled"),
    ("bluemsx_vdp_synctype", "bluemsx_vdp_synctype", "Auto"),
];

const PX68K: &[OptionRow] = &[
    ("px68k_cpuspeed", "px68k_cpuspeed", "10Mhz"),
    ("px68k_ramsize", "px68k_ramsize", "2MB"),
    ("px68k_frameskip", "px68k_frameskip", "Full Frame"),
    ("px68k_disk_drive", "px68k_disk_drive", "FDD1"),
];

fn table(core: &str) -> &'static [OptionRow] {
    match core {
        "fceumm" => FCEUMM,
        "beetle-saturn" => BEETLE_SATURN,
        "snes9x" => SNES9X,
        "bsnes" => BSNES,
        "genesisplusgx" => GENESIS_PLUS_GX,
        "mgba" => MGBA,
        "pcsx_rearmed" => PCSX_REARMED,
        "puae" => PUAE,
        "bluemsx" => BLUEMSX,
        "px68k" => PX68K,
        _ => &[],
    }
}

/// Option values for the selected core.
pub(super) fn core_options(emulator: &Emulator) -> Result<Vec<(&'static str, String)>> {
    let config = &emulator.config;
    let mut options: Vec<(&'static str, String)> = table(&emulator.core)
        .iter()
        .map(|(option, knob, default)| (*option, config.get_or(knob, default).to_string()))
        .collect();

    // Crosshair options that follow the attached light guns
    let need_cross = emulator.active_guns().iter().any(|g| g.need_cross);
    match emulator.core.as_str() {
        "fceumm" => {
            let show = match config.get_bool("fceumm_crosshair")? {
                Some(explicit) => explicit,
                None => need_cross,
            };
            options.push(("fceumm_show_crosshair", enabled(show)));
        }
        "snes9x" => {
            let show = config.get_bool_or("snes9x_crosshair", need_cross)?;
            options.push(("snes9x_superscope_crosshair", if show { "2" } else { "0" }.into()));
        }
        "genesisplusgx" => {
            let show = config.get_bool_or("gpgx_gun_cursor", need_cross)?;
            options.push(("genesis_plus_gx_gun_cursor", enabled(show)));
        }
        _ => {}
    }
    Ok(options)
}

fn enabled(value: bool) -> String {
    if value { "enabled" } else { "disabled" }.to_string()
}

/// Device id plugged into port 2 when a light gun is in use.
pub(super) fn gun_device(core: &str) -> Option<&'static str> {
    match core {
        "fceumm" => Some("258"),
        "snes9x" => Some("260"),
        "genesisplusgx" => Some("260"),
        "beetle-saturn" => Some("260"),
        _ => None,
    }
}
