pub mod button;
pub mod container;
pub mod flex;
pub mod icon;
pub mod stack;
pub mod text;
pub mod theme_toggle;
