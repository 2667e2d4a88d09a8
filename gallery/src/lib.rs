//! AppForge gallery — shared, append-only collection of published apps
//!
//! Entries are immutable once written. Concurrent publication only needs
//! last-write-wins: listing orders by the recorded timestamp at read time.

pub mod store;
pub mod thumbnail;

pub use store::{GalleryEntry, GalleryStore, NewGalleryEntry, SqliteGallery};
pub use thumbnail::render_thumbnail;
