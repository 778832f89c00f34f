//! Key and mouse button names
//!
//! Bindings are stored by name (`"f5"`, `"space"`, `"x2"`). Names are
//! lowercase; common spellings are folded onto one canonical name so that
//! `"Escape"` and `"esc"` bind the same key.

/// Named keys other than letters, digits and function keys
const NAMED_KEYS: &[&str] = &[
    "space", "enter", "esc", "tab", "backspace", "caps lock",
    "shift", "right shift", "ctrl", "right ctrl", "alt", "alt gr",
    "windows", "right windows", "up", "down", "left", "right",
    "home", "end", "page up", "page down", "insert", "delete",
    "print screen", "scroll lock", "pause", "num lock",
    "`", "-", "=", "[", "]", ";", "'", "\\", ",", ".", "/",
    "num 0", "num 1", "num 2", "num 3", "num 4",
    "num 5", "num 6", "num 7", "num 8", "num 9",
    "num enter", "num -", "num +", "num *", "num /", "num .",
];

const KEY_ALIASES: &[(&str, &str)] = &[
    ("escape", "esc"),
    ("return", "enter"),
    ("spacebar", "space"),
    ("control", "ctrl"),
    ("left ctrl", "ctrl"),
    ("left shift", "shift"),
    ("left alt", "alt"),
    ("left windows", "windows"),
    ("win", "windows"),
    ("pgup", "page up"),
    ("pgdn", "page down"),
    ("del", "delete"),
    ("ins", "insert"),
];

/// Mouse buttons in the order they are usually numbered
pub const MOUSE_BUTTONS: &[&str] = &["left", "right", "middle", "x", "x2"];

const BUTTON_ALIASES: &[(&str, &str)] = &[("x1", "x"), ("back", "x"), ("forward", "x2")];

/// Highest function key a hook can report
const MAX_FUNCTION_KEY: u32 = 24;

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

fn is_function_key(name: &str) -> bool {
    name.strip_prefix('f')
        .filter(|n| !n.starts_with('0'))
        .and_then(|n| n.parse::<u32>().ok())
        .is_some_and(|n| (1..=MAX_FUNCTION_KEY).contains(&n))
}

fn is_letter_or_digit(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
}

/// Canonical keyboard key name, or `None` if unknown
pub fn normalize_key(name: &str) -> Option<String> {
    let folded = fold(name);
    let canonical = KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded);

    let known = is_letter_or_digit(&canonical)
        || is_function_key(&canonical)
        || NAMED_KEYS.contains(&canonical.as_str());
    known.then_some(canonical)
}

/// Canonical mouse button name, or `None` if unknown
pub fn normalize_button(name: &str) -> Option<String> {
    let folded = fold(name);
    let canonical = BUTTON_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded);
    MOUSE_BUTTONS.contains(&canonical.as_str()).then_some(canonical)
}

#[cfg(feature = "global-input")]
pub use self::hook_names::{button_name, key_name};

/// Names for the codes reported by the OS hook
#[cfg(feature = "global-input")]
mod hook_names {
    use rdev::{Button, Key};

    pub fn button_name(button: Button) -> Option<&'static str> {
        match button {
            Button::Left => Some("left"),
            Button::Right => Some("right"),
            Button::Middle => Some("middle"),
            // X buttons are reported as 1/2 on Windows and 8/9 on X11
            Button::Unknown(1) | Button::Unknown(8) => Some("x"),
            Button::Unknown(2) | Button::Unknown(9) => Some("x2"),
            Button::Unknown(_) => None,
        }
    }

    pub fn key_name(key: Key) -> Option<&'static str> {
        use Key::*;
        let name = match key {
            KeyA => "a", KeyB => "b", KeyC => "c", KeyD => "d", KeyE => "e",
            KeyF => "f", KeyG => "g", KeyH => "h", KeyI => "i", KeyJ => "j",
            KeyK => "k", KeyL => "l", KeyM => "m", KeyN => "n", KeyO => "o",
            KeyP => "p", KeyQ => "q", KeyR => "r", KeyS => "s", KeyT => "t",
            KeyU => "u", KeyV => "v", KeyW => "w", KeyX => "x", KeyY => "y",
            KeyZ => "z",
            Num0 => "0", Num1 => "1", Num2 => "2", Num3 => "3", Num4 => "4",
            Num5 => "5", Num6 => "6", Num7 => "7", Num8 => "8", Num9 => "9",
            F1 => "f1", F2 => "f2", F3 => "f3", F4 => "f4", F5 => "f5", F6 => "f6",
            F7 => "f7", F8 => "f8", F9 => "f9", F10 => "f10", F11 => "f11", F12 => "f12",
            Space => "space",
            Return => "enter",
            Escape => "esc",
            Tab => "tab",
            Backspace => "backspace",
            CapsLock => "caps lock",
            ShiftLeft => "shift",
            ShiftRight => "right shift",
            ControlLeft => "ctrl",
            ControlRight => "right ctrl",
            Alt => "alt",
            AltGr => "alt gr",
            MetaLeft => "windows",
            MetaRight => "right windows",
            UpArrow => "up",
            DownArrow => "down",
            LeftArrow => "left",
            RightArrow => "right",
            Home => "home",
            End => "end",
            PageUp => "page up",
            PageDown => "page down",
            Insert => "insert",
            Delete => "delete",
            PrintScreen => "print screen",
            ScrollLock => "scroll lock",
            Pause => "pause",
            NumLock => "num lock",
            BackQuote => "`",
            Minus => "-",
            Equal => "=",
            LeftBracket => "[",
            RightBracket => "]",
            SemiColon => ";",
            Quote => "'",
            BackSlash | IntlBackslash => "\\",
            Comma => ",",
            Dot => ".",
            Slash => "/",
            Kp0 => "num 0", Kp1 => "num 1", Kp2 => "num 2", Kp3 => "num 3", Kp4 => "num 4",
            Kp5 => "num 5", Kp6 => "num 6", Kp7 => "num 7", Kp8 => "num 8", Kp9 => "num 9",
            KpReturn => "num enter",
            KpMinus => "num -",
            KpPlus => "num +",
            KpMultiply => "num *",
            KpDivide => "num /",
            KpDelete => "num .",
            _ => return None,
        };
        Some(name)
    }
}
