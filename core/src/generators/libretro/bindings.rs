//! RetroArch joypad bindings

use crate::controller::{Controller, Input, InputKind};

/// Logical input to RetroArch button name.
const BUTTONS: &[(&str, &str)] = &[
    ("a", "a"),
    ("b", "b"),
    ("x", "x"),
    ("y", "y"),
    ("start", "start"),
    ("select", "select"),
    ("up", "up"),
    ("down", "down"),
    ("left", "left"),
    ("right", "right"),
    ("l1", "l"),
    ("r1", "r"),
    ("l2", "l2"),
    ("r2", "r2"),
    ("l3", "l3"),
    ("r3", "r3"),
];

/// Stick half-axes: logical input to the RetroArch `minus`/`plus` pair.
const STICKS: &[(&str, &str, &str)] = &[
    ("joystick1left", "l_x_minus", "l_x_plus"),
    ("joystick1up", "l_y_minus", "l_y_plus"),
    ("joystick2left", "r_x_minus", "r_x_plus"),
    ("joystick2up", "r_y_minus", "r_y_plus"),
];

fn signed_axis(id: i32, value: i32) -> String {
    format!("{}{}", if value < 0 { "-" } else { "+" }, id)
}

/// `(suffix, value)` for one digital binding, or `None` for keys.
fn digital(input: &Input) -> Option<(&'static str, String)> {
    match input.kind {
        InputKind::Button => Some(("btn", input.id.to_string())),
        InputKind::Hat => Some(("btn", format!("h{}{}", input.id, input.hat_direction()?))),
        InputKind::Axis => Some(("axis", signed_axis(input.id, input.value))),
        InputKind::Key => None,
    }
}

/// Binding lines for one port, as `(key, value)` pairs.
pub(super) fn port_bindings(port: usize, controller: &Controller) -> Vec<(String, String)> {
    let prefix = format!("input_player{}", port);
    let mut out = vec![(format!("{}_joypad_index", prefix), controller.index.to_string())];

    for (logical, name) in BUTTONS {
        if let Some((suffix, value)) = controller.input(logical).and_then(digital) {
            out.push((format!("{}_{}_{}", prefix, name, suffix), value));
        }
    }
    for (logical, minus, plus) in STICKS {
        if let Some(input) = controller.input(logical)
            && input.kind == InputKind::Axis
        {
            out.push((format!("{}_{}_axis", prefix, minus), signed_axis(input.id, input.value)));
            out.push((format!("{}_{}_axis", prefix, plus), signed_axis(input.id, -input.value)));
        }
    }
    out
}

/// Hotkey enable button, bound from player one only.
pub(super) fn hotkey_binding(controller: &Controller) -> Option<(String, String)> {
    let (suffix, value) = controller.input("hotkey").and_then(digital)?;
    Some((format!("input_enable_hotkey_{}", suffix), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{keyboard, xbox_pad};

    #[test]
    fn test_pad_bindings() {
        let pad = xbox_pad(1, "/dev/input/event3");
        let bindings = port_bindings(2, &pad);
        let get = |k: &str| {
            bindings
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("input_player2_joypad_index"), Some("0"));
        assert_eq!(get("input_player2_a_btn"), Some("0"));
        assert_eq!(get("input_player2_up_btn"), Some("h0up"));
        assert_eq!(get("input_player2_l2_axis"), Some("+2"));
        assert_eq!(get("input_player2_l_x_minus_axis"), Some("-0"));
        assert_eq!(get("input_player2_l_x_plus_axis"), Some("+0"));
    }

    #[test]
    fn test_keyboard_has_only_index() {
        let kb = keyboard(1, "/dev/input/event1");
        assert_eq!(port_bindings(1, &kb).len(), 1);
        assert!(hotkey_binding(&kb).is_none());
    }
}
