//! Scene (draw stream) types.
//!
//! Draw commands are renderer-agnostic and ordered deterministically by
//! z-index, then insertion order.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
pub use z_index::ZIndex;
