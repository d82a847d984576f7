//! Pages and cursors over resource collections.
//!
//! - [`Page`]: one bounded batch of resources plus navigation links
//! - [`PageFactory`] / [`HalPageFactory`]: builds pages from list responses
//! - [`CursorFactory`] / [`ResourceCursorFactory`]: builds cursors from a first page
//! - [`ResourceCursor`]: lazy, forward-only iteration across all pages

mod cursor;
mod factory;
mod page;

pub use cursor::{CursorFactory, ResourceCursor, ResourceCursorFactory};
pub use factory::{HalPageFactory, PageFactory};
pub use page::Page;
