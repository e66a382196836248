//! Input subsystem.
//!
//! Platform-agnostic pointer input. The runtime translates window system events
//! into `InputEvent`s; keyboard input is not tracked.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};
