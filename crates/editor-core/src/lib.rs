mod candidates;
mod config;
mod editing;
mod format;
mod history;
mod host;
mod mention;
mod persist;
mod selection;
mod shortcut;
mod store;

pub use crate::candidates::*;
pub use crate::config::*;
pub use crate::editing::*;
pub use crate::format::*;
pub use crate::history::*;
pub use crate::host::*;
pub use crate::mention::*;
pub use crate::persist::*;
pub use crate::selection::*;
pub use crate::shortcut::*;
pub use crate::store::*;
