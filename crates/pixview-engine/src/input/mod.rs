//! Keyboard input: winit key translation and the fixed binding table.

mod bindings;
mod keys;

pub use bindings::action_for;
pub use keys::Key;
