mod element;
mod host;
mod mention_list;
mod state;
mod toolbar;

pub use host::BufferHost;
pub use state::*;
pub use toolbar::{ToolbarButton, ToolbarSeparator};

use gpui::App;

/// Registers the editor key bindings.
pub fn init(cx: &mut App) {
    state::init(cx);
}
