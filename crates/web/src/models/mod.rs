//! Domain models for the web crate.

pub mod session;
pub mod view;

pub use session::CurrentUser;
pub use session::keys as session_keys;
pub use view::{PageState, WardrobeView};
