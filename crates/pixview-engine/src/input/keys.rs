use winit::keyboard::{KeyCode, PhysicalKey};

/// Platform-agnostic keys the viewer reacts to.
///
/// Deliberately a subset: anything outside the binding table maps to
/// [`Key::Unknown`] and is ignored upstream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Equal,
    Minus,
    Digit0,
    R,
    E,
    S,
    C,
    Escape,
    Unknown,
}

impl Key {
    /// Translates a winit physical key. Layout-independent: physical key
    /// positions, not produced characters.
    pub fn from_physical(pk: PhysicalKey) -> Self {
        let PhysicalKey::Code(code) = pk else {
            return Key::Unknown;
        };
        match code {
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::Equal | KeyCode::NumpadAdd => Key::Equal,
            KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
            KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,

            KeyCode::KeyR => Key::R,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyC => Key::C,

            KeyCode::Escape => Key::Escape,

            _ => Key::Unknown,
        }
    }
}
