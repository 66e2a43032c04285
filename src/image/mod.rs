//! Thumbnail rendering for stored images
//!
//! Resizes a stored image to fill a fixed 16:9 box and re-encodes it as PNG.

pub mod thumbnail;

pub use thumbnail::Thumbnailer;

pub const THUMBNAIL_WIDTH: u32 = 320;
pub const THUMBNAIL_HEIGHT: u32 = 180;
