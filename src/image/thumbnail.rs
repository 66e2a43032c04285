use super::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::{Error, Result};
use image::imageops::FilterType;
use image::{ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct Thumbnailer {
    width: u32,
    height: u32,
}

impl Thumbnailer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn render_sync(source: PathBuf, target: PathBuf, width: u32, height: u32) -> Result<()> {
        let img = ImageReader::open(&source)?.with_guessed_format()?.decode()?;
        let resized = img.resize_to_fill(width, height, FilterType::Lanczos3);
        resized.save_with_format(target, ImageFormat::Png)?;
        Ok(())
    }

    /// Render `source` into a `width`×`height` PNG at `target`, cropping to fill.
    pub async fn render(&self, source: &Path, target: &Path) -> Result<()> {
        tokio::task::spawn_blocking({
            let source = source.to_path_buf();
            let target = target.to_path_buf();
            let (width, height) = (self.width, self.height);
            move || Self::render_sync(source, target, width, height)
        })
        .await
        .map_err(|e| Error::Invariant(format!("Thumbnail task join error: {}", e)))?
    }
}

impl Default for Thumbnailer {
    fn default() -> Self {
        Self::new(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
    }
}
