//! SDL game controller mapping strings

use super::{Controller, Input, InputKind};

/// Logical input names paired with their SDL GameController names.
const SDL_NAMES: &[(&str, &str)] = &[
    ("a", "a"),
    ("b", "b"),
    ("x", "x"),
    ("y", "y"),
    ("start", "start"),
    ("select", "back"),
    ("hotkey", "guide"),
    ("up", "dpup"),
    ("down", "dpdown"),
    ("left", "dpleft"),
    ("right", "dpright"),
    ("l1", "leftshoulder"),
    ("r1", "rightshoulder"),
    ("l2", "lefttrigger"),
    ("r2", "righttrigger"),
    ("l3", "leftstick"),
    ("r3", "rightstick"),
    ("joystick1left", "leftx"),
    ("joystick1up", "lefty"),
    ("joystick2left", "rightx"),
    ("joystick2up", "righty"),
];

/// SDL GameController name of a logical input.
pub fn sdl_name(logical: &str) -> Option<&'static str> {
    SDL_NAMES
        .iter()
        .find(|(name, _)| *name == logical)
        .map(|(_, sdl)| *sdl)
}

fn is_stick(logical: &str) -> bool {
    logical.starts_with("joystick")
}

/// SDL binding value for one input (`b3`, `h0.1`, `a2`, `-a1`).
fn binding(logical: &str, input: &Input) -> Option<String> {
    match input.kind {
        InputKind::Button => Some(format!("b{}", input.id)),
        InputKind::Hat => Some(format!("h{}.{}", input.id, input.value)),
        InputKind::Axis if is_stick(logical) => {
            // Sticks are described by their up/left half; a positive value
            // there means the axis is inverted.
            let invert = if input.value > 0 { "~" } else { "" };
            Some(format!("a{}{}", input.id, invert))
        }
        InputKind::Axis => {
            let sign = if input.value < 0 { "-" } else { "+" };
            Some(format!("{}a{}", sign, input.id))
        }
        InputKind::Key => None,
    }
}

pub(super) fn mapping_line(controller: &Controller) -> String {
    let mut line = format!(
        "{},{},platform:Linux,",
        controller.guid,
        controller.name.replace(',', " ")
    );
    for (logical, sdl) in SDL_NAMES {
        if let Some(input) = controller.input(logical)
            && let Some(value) = binding(logical, input)
        {
            line.push_str(sdl);
            line.push(':');
            line.push_str(&value);
            line.push(',');
        }
    }
    line
}
