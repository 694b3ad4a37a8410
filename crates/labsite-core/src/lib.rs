//! labsite-core: media-library model and page loading for the lab website.
//!
//! - `media` / `store` read the immutable card store out of the page HTML.
//! - `selection`, `pipeline`, `pagination` and `render` are pure and
//!   synchronous; `controller` wires them to user interactions.
//! - `site`, `partials` and `news` do the (optional) I/O.

pub mod config;
pub mod controller;
pub mod error;
pub mod media;
pub mod news;
pub mod pagination;
pub mod partials;
pub mod pipeline;
pub mod platform;
pub mod render;
pub mod selection;
pub mod site;
pub mod store;

pub use controller::MediaController;
pub use error::SiteError;
pub use media::MediaEntry;
pub use pipeline::ViewResult;
pub use selection::{SelectionState, SortMode};
