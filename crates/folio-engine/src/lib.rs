//! Folio engine crate.
//!
//! Platform and GPU runtime pieces shared by the site: window loop, device,
//! input, frame timing, the draw-list scene and its renderers, and fonts.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
