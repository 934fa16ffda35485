use crate::view::ViewAction;

use super::keys::Key;

/// The fixed key-binding table.
///
/// `=` zooms in so the plus action works unshifted; numpad `+`/`-` alias the
/// main row in [`Key::from_physical`](super::Key::from_physical).
pub fn action_for(key: Key) -> Option<ViewAction> {
    match key {
        Key::Equal => Some(ViewAction::ZoomIn),
        Key::Minus => Some(ViewAction::ZoomOut),
        Key::ArrowUp => Some(ViewAction::MoveUp),
        Key::ArrowDown => Some(ViewAction::MoveDown),
        Key::ArrowLeft => Some(ViewAction::MoveLeft),
        Key::ArrowRight => Some(ViewAction::MoveRight),
        Key::R => Some(ViewAction::RotateClockwise),
        Key::E => Some(ViewAction::RotateAntiClockwise),
        Key::Digit0 => Some(ViewAction::ResetView),
        Key::S => Some(ViewAction::ToggleSmoothing),
        Key::C => Some(ViewAction::ToggleControlMode),
        // Escape closes the window; the runtime handles it directly.
        Key::Escape | Key::Unknown => None,
    }
}
