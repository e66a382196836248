//! Theme preference, the injectable store that holds it, and the palettes
//! the site derives from it.

mod palette;
mod persist;
mod preference;
mod store;

pub use palette::{Palette, TogglePalette};
pub use persist::{ThemeFile, ThemeFileError};
pub use preference::{ParseThemeError, ResolvedTheme, ThemePreference};
pub use store::{SharedThemeStore, SubscriptionId, ThemeStore};
